use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh::{RefreshIndicatorController, RefreshMode};

/// Collects every mode a controller passes through.
#[derive(Clone, Default)]
pub struct ModeRecorder {
    modes: Rc<RefCell<Vec<RefreshMode>>>,
}

impl ModeRecorder {
    pub fn attach(controller: &RefreshIndicatorController) -> Self {
        let recorder = Self::default();
        let modes = Rc::clone(&recorder.modes);
        controller.add_mode_listener(move |mode| modes.borrow_mut().push(mode));
        recorder
    }

    pub fn modes(&self) -> Vec<RefreshMode> {
        self.modes.borrow().clone()
    }

    pub fn last(&self) -> Option<RefreshMode> {
        self.modes.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.modes.borrow_mut().clear();
    }
}
