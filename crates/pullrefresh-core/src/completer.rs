//! Single-threaded one-shot completion shared by any number of waiters.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use smallvec::SmallVec;

struct CompletionState<T> {
    value: Option<T>,
    wakers: SmallVec<[Waker; 2]>,
}

/// Write side of a [`CompletionFuture`].
///
/// Only the first call to [`Completer::complete`] has an effect.
pub struct Completer<T: Clone> {
    state: Rc<RefCell<CompletionState<T>>>,
}

/// Cloneable future resolving with the value passed to [`Completer::complete`].
pub struct CompletionFuture<T: Clone> {
    state: Rc<RefCell<CompletionState<T>>>,
}

impl<T: Clone> Completer<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                value: None,
                wakers: SmallVec::new(),
            })),
        }
    }

    pub fn future(&self) -> CompletionFuture<T> {
        CompletionFuture {
            state: Rc::clone(&self.state),
        }
    }

    /// Stores `value` and wakes every waiter. Returns `false` if already completed.
    pub fn complete(&self, value: T) -> bool {
        let wakers = {
            let mut state = self.state.borrow_mut();
            if state.value.is_some() {
                return false;
            }
            state.value = Some(value);
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
        true
    }

    pub fn is_completed(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<T: Clone> Default for Completer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> CompletionFuture<T> {
    pub fn is_completed(&self) -> bool {
        self.state.borrow().value.is_some()
    }

    /// Returns the completed value without polling.
    pub fn peek(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    /// Whether both futures observe the same completer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<T: Clone> Clone for CompletionFuture<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone> Future for CompletionFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(value) = state.value.as_ref() {
            return Poll::Ready(value.clone());
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl<T: Clone> fmt::Debug for CompletionFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionFuture")
            .field("completed", &self.is_completed())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/completer_tests.rs"]
mod tests;
