//! The refresh indicator state machine.
//!
//! [`RefreshIndicatorController`] consumes scroll notifications, owns the
//! position and scale animations, and drives one refresh cycle at a time:
//!
//! ```text
//! idle -> drag -> armed -> snap -> refreshing -> done -> idle
//!           \        \
//!            +--------+-> canceled -> idle
//! ```
//!
//! Every deferred continuation (animation end, refresh completion) holds a
//! weak reference and checks the lifecycle scope plus the expected mode before
//! acting, so stale work from a superseded cycle is dropped silently.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use pullrefresh_animation::{Animatable, AnimationSpec};
use pullrefresh_core::{Completer, LifecycleScope, RuntimeHandle};
use smallvec::SmallVec;

use crate::config::RefreshIndicatorConfig;
use crate::constants::{
    ARMED_POSITION, INDICATOR_SCALE_DURATION_MILLIS, INDICATOR_SNAP_DURATION_MILLIS,
};
use crate::error::{ConfigError, RefreshError};
use crate::gesture::{self, GestureDecision};
use crate::handle::{RefreshHandle, RefreshOutcome};
use crate::indicator;
use crate::mode::{DragSession, IndicatorEdge, RefreshMode};
use crate::notification::{OverscrollIndicatorNotification, ScrollNotification};

type ModeListener = Rc<dyn Fn(RefreshMode)>;

struct ControllerState {
    mode: RefreshMode,
    session: Option<DragSession>,
    pending: Option<Rc<Completer<RefreshOutcome>>>,
    listeners: SmallVec<[ModeListener; 2]>,
}

pub(crate) struct ControllerInner {
    pub(crate) config: RefreshIndicatorConfig,
    runtime: RuntimeHandle,
    lifecycle: LifecycleScope,
    /// Drag progress in `[0, 1]`; [`ARMED_POSITION`] is the refresh position.
    pub(crate) position: Animatable<f32>,
    /// Dismissal progress in `[0, 1]`; 1 means fully shrunk.
    pub(crate) scale: Animatable<f32>,
    state: RefCell<ControllerState>,
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.lifecycle.dispose();
        if let Some(pending) = self.state.get_mut().pending.take() {
            pending.complete(Err(RefreshError::Disposed));
        }
    }
}

/// Pull-to-refresh controller attached to one scrollable.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct RefreshIndicatorController {
    inner: Rc<ControllerInner>,
}

impl RefreshIndicatorController {
    pub fn new(config: RefreshIndicatorConfig, runtime: RuntimeHandle) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = runtime.frame_clock();
        let inner = ControllerInner {
            config,
            lifecycle: LifecycleScope::new(runtime.clone()),
            runtime,
            position: Animatable::new(0.0, clock.clone()).with_bounds(0.0, 1.0),
            scale: Animatable::new(0.0, clock).with_bounds(0.0, 1.0),
            state: RefCell::new(ControllerState {
                mode: RefreshMode::Idle,
                session: None,
                pending: None,
                listeners: SmallVec::new(),
            }),
        };
        Ok(Self {
            inner: Rc::new(inner),
        })
    }

    fn from_weak(weak: &Weak<ControllerInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn downgrade(&self) -> Weak<ControllerInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn config(&self) -> &RefreshIndicatorConfig {
        &self.inner.config
    }

    pub fn mode(&self) -> RefreshMode {
        self.inner.state.borrow().mode
    }

    pub fn session(&self) -> Option<DragSession> {
        self.inner.state.borrow().session
    }

    pub fn is_refreshing(&self) -> bool {
        self.mode() == RefreshMode::Refreshing
    }

    /// False once [`dispose`](Self::dispose) ran or the runtime is gone.
    pub fn is_active(&self) -> bool {
        self.inner.lifecycle.is_active()
    }

    /// Register `listener` to be called after every mode change.
    ///
    /// Listeners run with no internal borrows held and may call back into the
    /// controller.
    pub fn add_mode_listener(&self, listener: impl Fn(RefreshMode) + 'static) {
        self.inner
            .state
            .borrow_mut()
            .listeners
            .push(Rc::new(listener));
    }

    /// Feed a scroll notification from the decorated scrollable.
    ///
    /// Always returns `false` so the notification keeps bubbling.
    pub fn handle_scroll_notification(&self, notification: &ScrollNotification) -> bool {
        if !self.is_active() || !self.inner.config.accepts(notification) {
            return false;
        }
        let (mode, edge) = {
            let state = self.inner.state.borrow();
            (state.mode, state.session.map(|session| session.edge))
        };
        let decision = gesture::interpret(mode, edge, notification);
        if decision != GestureDecision::Ignore {
            log::trace!("{:?} in {mode}: {decision:?}", notification.kind);
        }

        match decision {
            GestureDecision::Ignore => {}
            GestureDecision::Begin(edge) => {
                self.begin_session(edge);
                self.transition(RefreshMode::Drag, |_| {});
            }
            GestureDecision::Cancel => self.dismiss(RefreshMode::Canceled),
            GestureDecision::Drag {
                delta,
                viewport_extent,
                release_if_armed,
            } => {
                if let Some(session) = self.inner.state.borrow_mut().session.as_mut() {
                    session.offset -= delta;
                }
                self.check_drag_offset(viewport_extent);
                if release_if_armed && self.mode() == RefreshMode::Armed {
                    self.start_show();
                }
            }
            GestureDecision::Show => {
                self.start_show();
            }
        }
        false
    }

    /// Suppress the scrollable's own leading-edge glow while a pull is in
    /// progress.
    ///
    /// Returns `true` when the notification was consumed.
    pub fn handle_overscroll_indicator_notification(
        &self,
        notification: &OverscrollIndicatorNotification,
    ) -> bool {
        if notification.depth != 0 || !notification.leading {
            return false;
        }
        if self.mode() == RefreshMode::Drag {
            notification.disallow_indicator();
            return true;
        }
        false
    }

    /// Show the indicator at `edge` and run the refresh callback, as if the
    /// user had pulled far enough.
    ///
    /// Calls made while a cycle is already snapping or refreshing return that
    /// cycle's handle and change nothing.
    pub fn show_at(&self, edge: IndicatorEdge) -> RefreshHandle {
        let mode = self.mode();
        if mode.is_cycle_in_flight() {
            if let Some(pending) = self.pending() {
                return RefreshHandle::new(&pending);
            }
        }
        if !self.is_active() {
            return RefreshHandle::resolved(Err(RefreshError::Disposed));
        }
        match mode {
            RefreshMode::Idle => self.begin_session(edge),
            RefreshMode::Done => self.inner.scale.snap_to(0.0),
            _ => {}
        }
        self.start_show()
    }

    /// Shorthand for [`show_at`](Self::show_at) with [`IndicatorEdge::Top`].
    pub fn show(&self) -> RefreshHandle {
        self.show_at(IndicatorEdge::Top)
    }

    /// Detach the controller.
    ///
    /// Running animations stop and a pending refresh resolves with
    /// [`RefreshError::Disposed`]. The refresh callback's own future is not
    /// cancelled, but its outcome is ignored.
    pub fn dispose(&self) {
        log::debug!("disposing refresh indicator in {}", self.mode());
        self.inner.lifecycle.dispose();
        self.inner.position.stop();
        self.inner.scale.stop();
        let pending = self.inner.state.borrow_mut().pending.take();
        if let Some(pending) = pending {
            pending.complete(Err(RefreshError::Disposed));
        }
    }

    /// Current render state; see [`IndicatorSnapshot`](crate::IndicatorSnapshot).
    pub fn snapshot(&self) -> indicator::IndicatorSnapshot {
        let state = self.inner.state.borrow();
        indicator::IndicatorSnapshot::capture(
            &self.inner,
            state.mode,
            state.session.map(|session| session.edge),
        )
    }

    fn begin_session(&self, edge: IndicatorEdge) {
        {
            let mut state = self.inner.state.borrow_mut();
            debug_assert!(state.mode == RefreshMode::Idle && state.session.is_none());
            state.session = Some(DragSession::new(edge));
        }
        log::debug!("refresh session started at {edge:?} edge");
        self.inner.scale.snap_to(0.0);
        self.inner.position.snap_to(0.0);
    }

    fn check_drag_offset(&self, viewport_extent: f32) {
        let (mode, offset) = {
            let state = self.inner.state.borrow();
            match state.session {
                Some(session) => (state.mode, session.offset),
                None => return,
            }
        };
        debug_assert!(mode.is_tracking_drag());
        let value = gesture::drag_position(offset, viewport_extent, mode == RefreshMode::Armed);
        self.inner.position.snap_to(value);
        if mode == RefreshMode::Drag
            && indicator::value_color(self.inner.config.color(), value).is_opaque()
        {
            self.transition(RefreshMode::Armed, |_| {});
        }
    }

    /// Enter snap mode with a fresh pending completion and animate toward the
    /// refresh position.
    fn start_show(&self) -> RefreshHandle {
        let completer = Rc::new(Completer::new());
        let handle = RefreshHandle::new(&completer);
        let entered = self.transition(RefreshMode::Snap, |state| {
            debug_assert!(state.session.is_some());
            state.pending = Some(completer);
        });
        if !entered {
            return handle;
        }

        let weak = self.downgrade();
        self.inner.position.animate_to(
            ARMED_POSITION,
            AnimationSpec::linear(INDICATOR_SNAP_DURATION_MILLIS),
            move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.on_snapped();
                }
            },
        );
        handle
    }

    fn on_snapped(&self) {
        if !self.is_active() || self.mode() != RefreshMode::Snap {
            return;
        }
        if !self.transition(RefreshMode::Refreshing, |_| {}) {
            return;
        }

        let refresh = self.inner.config.start_refresh();
        let weak = self.downgrade();
        let lifecycle = self.inner.lifecycle.clone();
        let spawned = self.inner.runtime.spawn_ui(async move {
            let outcome = refresh.await.map_err(RefreshError::from);
            if let Err(err) = &outcome {
                log::warn!("{err}");
            }
            lifecycle.post_ui(move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.finish_refresh(outcome);
                }
            });
        });
        if spawned.is_none() {
            log::warn!("runtime unavailable; refresh callback future dropped");
        }
    }

    fn finish_refresh(&self, outcome: RefreshOutcome) {
        if !self.is_active() || self.mode() != RefreshMode::Refreshing {
            return;
        }
        if let Some(pending) = self.pending() {
            pending.complete(outcome);
        }
        self.dismiss(RefreshMode::Done);
    }

    fn pending(&self) -> Option<Rc<Completer<RefreshOutcome>>> {
        self.inner.state.borrow().pending.clone()
    }

    /// Animate the indicator away and return to idle once it is gone.
    fn dismiss(&self, target: RefreshMode) {
        debug_assert!(matches!(target, RefreshMode::Done | RefreshMode::Canceled));
        let (animation, end_value) = match target {
            RefreshMode::Done => (&self.inner.scale, 1.0),
            RefreshMode::Canceled => (&self.inner.position, 0.0),
            _ => return,
        };
        if !self.transition(target, |_| {}) {
            return;
        }

        let weak = self.downgrade();
        animation.animate_to(
            end_value,
            AnimationSpec::linear(INDICATOR_SCALE_DURATION_MILLIS),
            move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.on_dismissed(target);
                }
            },
        );
    }

    fn on_dismissed(&self, target: RefreshMode) {
        if !self.is_active() || self.mode() != target {
            return;
        }
        self.transition(RefreshMode::Idle, |state| {
            state.session = None;
            state.pending = None;
        });
    }

    /// Set the mode and apply `update` under one borrow, then notify
    /// listeners once the borrow is released.
    ///
    /// Returns false when a listener disposed the controller or moved it to
    /// another mode; the caller must then skip its follow-up work.
    fn transition(&self, mode: RefreshMode, update: impl FnOnce(&mut ControllerState)) -> bool {
        let (previous, listeners) = {
            let mut state = self.inner.state.borrow_mut();
            let previous = state.mode;
            state.mode = mode;
            update(&mut *state);
            (previous, state.listeners.clone())
        };
        if previous != mode {
            log::debug!("refresh indicator {previous} -> {mode}");
            for listener in listeners {
                listener(mode);
            }
        }
        let current = self.is_active() && self.mode() == mode;
        if !current {
            log::trace!("mode {mode} superseded by a listener");
        }
        current
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
