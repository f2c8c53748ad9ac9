use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pullrefresh_core::{Completer, CompletionFuture};

use crate::error::RefreshError;

pub type RefreshOutcome = Result<(), RefreshError>;

/// Awaitable handle to one refresh cycle.
///
/// Every call to `show` made during the same cycle returns a clone observing
/// the same completion. The handle resolves when the refresh callback's
/// future finishes and the indicator starts dismissing, or with
/// [`RefreshError::Disposed`] if the controller goes away first.
#[derive(Clone, Debug)]
pub struct RefreshHandle {
    future: CompletionFuture<RefreshOutcome>,
}

impl RefreshHandle {
    pub(crate) fn new(completer: &Completer<RefreshOutcome>) -> Self {
        Self {
            future: completer.future(),
        }
    }

    /// Handle that has already resolved with `outcome`.
    pub(crate) fn resolved(outcome: RefreshOutcome) -> Self {
        let completer = Completer::new();
        completer.complete(outcome);
        Self::new(&completer)
    }

    pub fn is_complete(&self) -> bool {
        self.future.is_completed()
    }

    /// The outcome, if the cycle has finished.
    pub fn try_result(&self) -> Option<RefreshOutcome> {
        self.future.peek()
    }

    /// Whether both handles belong to the same refresh cycle.
    pub fn same_cycle(&self, other: &RefreshHandle) -> bool {
        self.future.ptr_eq(&other.future)
    }
}

impl Future for RefreshHandle {
    type Output = RefreshOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.future).poll(cx)
    }
}
