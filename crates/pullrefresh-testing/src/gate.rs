use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use pullrefresh::{RefreshIndicatorConfig, RefreshResult};
use pullrefresh_core::Completer;

struct GateState {
    calls: Cell<usize>,
    pending: RefCell<Option<Completer<Result<(), String>>>>,
}

/// Refresh callback whose future stays pending until the test resolves it.
///
/// Clones share the same call count and pending refresh.
#[derive(Clone)]
pub struct RefreshGate {
    state: Rc<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            state: Rc::new(GateState {
                calls: Cell::new(0),
                pending: RefCell::new(None),
            }),
        }
    }

    /// Indicator config whose refresh callback is this gate.
    pub fn config(&self) -> RefreshIndicatorConfig {
        let gate = self.clone();
        RefreshIndicatorConfig::new(move || gate.begin())
    }

    fn begin(&self) -> impl Future<Output = RefreshResult> + 'static {
        self.state.calls.set(self.state.calls.get() + 1);
        let completer = Completer::new();
        let future = completer.future();
        *self.state.pending.borrow_mut() = Some(completer);
        async move {
            let result: RefreshResult = future.await.map_err(Into::into);
            result
        }
    }

    /// How many times the callback has been invoked.
    pub fn calls(&self) -> usize {
        self.state.calls.get()
    }

    pub fn is_waiting(&self) -> bool {
        self.state.pending.borrow().is_some()
    }

    /// Resolve the running refresh successfully. Returns `false` if none is running.
    pub fn succeed(&self) -> bool {
        self.resolve(Ok(()))
    }

    /// Resolve the running refresh with an error carrying `message`.
    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.resolve(Err(message.into()))
    }

    fn resolve(&self, result: Result<(), String>) -> bool {
        let pending = self.state.pending.borrow_mut().take();
        match pending {
            Some(completer) => completer.complete(result),
            None => false,
        }
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}
