use std::cell::Cell;
use std::rc::Rc;

use crate::runtime::RuntimeHandle;

/// Liveness flag shared between an owner and its deferred continuations.
///
/// Continuations capture a clone at schedule time and check
/// [`LifecycleScope::is_active`] before touching the owner's state. Once
/// [`LifecycleScope::dispose`] runs the flag never becomes active again.
#[derive(Clone)]
pub struct LifecycleScope {
    active: Rc<Cell<bool>>,
    runtime: RuntimeHandle,
}

impl LifecycleScope {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
            runtime,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get() && self.runtime.is_alive()
    }

    pub fn dispose(&self) {
        self.active.set(false);
    }

    /// Posts UI work that is skipped if the scope was disposed in the meantime.
    pub fn post_ui(&self, task: impl FnOnce() + 'static) {
        if !self.is_active() {
            return;
        }
        let active = Rc::clone(&self.active);
        self.runtime.enqueue_ui_task(Box::new(move || {
            if active.get() {
                task();
            }
        }));
    }
}
