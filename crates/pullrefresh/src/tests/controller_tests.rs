use super::*;
use crate::config::RefreshResult;
use crate::notification::{AxisDirection, ScrollMetrics};
use pullrefresh_core::TestRuntime;
use std::cell::Cell;

const FRAME_NANOS: u64 = 16_666_667;
const VIEWPORT: f32 = 400.0;

type Gate = Rc<RefCell<Option<Completer<Result<(), String>>>>>;

struct Fixture {
    runtime: TestRuntime,
    controller: RefreshIndicatorController,
    calls: Rc<Cell<u32>>,
    gate: Gate,
    time: u64,
}

fn fixture() -> Fixture {
    let runtime = TestRuntime::new();
    let calls = Rc::new(Cell::new(0));
    let gate: Gate = Rc::default();
    let config = RefreshIndicatorConfig::new({
        let calls = Rc::clone(&calls);
        let gate = Rc::clone(&gate);
        move || {
            calls.set(calls.get() + 1);
            let completer = Completer::new();
            let future = completer.future();
            *gate.borrow_mut() = Some(completer);
            async move {
                let result: RefreshResult = future.await.map_err(Into::into);
                result
            }
        }
    });
    let controller =
        RefreshIndicatorController::new(config, runtime.handle()).expect("valid config");
    Fixture {
        runtime,
        controller,
        calls,
        gate,
        time: 0,
    }
}

fn metrics(extent_before: f32) -> ScrollMetrics {
    ScrollMetrics::new(AxisDirection::Down, extent_before, VIEWPORT)
}

impl Fixture {
    fn send(&self, notification: ScrollNotification) {
        assert!(!self.controller.handle_scroll_notification(&notification));
    }

    fn pull(&self, distance: f32) {
        self.send(ScrollNotification::start(metrics(0.0)));
        self.send(ScrollNotification::overscroll(metrics(0.0), -distance));
    }

    fn release(&self) {
        self.send(ScrollNotification::end(metrics(0.0)));
    }

    fn frame(&mut self) {
        self.time += FRAME_NANOS;
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(self.time);
        handle.drain_ui();
    }

    /// Runs frames until no animation is scheduled.
    fn settle(&mut self) {
        let handle = self.runtime.handle();
        for _ in 0..240 {
            handle.drain_ui();
            if !handle.has_frame_callbacks() {
                return;
            }
            self.frame();
        }
        panic!("animations did not settle");
    }

    fn finish_refresh(&mut self, result: Result<(), String>) {
        let completer = self.gate.borrow_mut().take().expect("refresh running");
        completer.complete(result);
        self.runtime.handle().drain_ui();
    }
}

#[test]
fn pulling_past_threshold_arms() {
    let fx = fixture();
    fx.pull(30.0);
    assert_eq!(fx.controller.mode(), RefreshMode::Drag);
    assert!((fx.controller.snapshot().position - 0.3).abs() < 1e-6);

    fx.send(ScrollNotification::overscroll(metrics(0.0), -40.0));
    assert_eq!(fx.controller.mode(), RefreshMode::Armed);
    let session = fx.controller.session().expect("session");
    assert_eq!(session.edge, IndicatorEdge::Top);
    assert_eq!(session.offset, 70.0);
}

#[test]
fn armed_drag_keeps_minimum_position() {
    let fx = fixture();
    fx.pull(80.0);
    assert_eq!(fx.controller.mode(), RefreshMode::Armed);

    fx.send(ScrollNotification::update(metrics(0.0), 70.0));
    assert_eq!(fx.controller.mode(), RefreshMode::Armed);
    assert_eq!(fx.controller.snapshot().position, ARMED_POSITION);
}

#[test]
fn release_when_armed_runs_full_cycle() {
    let mut fx = fixture();
    fx.pull(90.0);
    fx.release();
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
    assert_eq!(fx.calls.get(), 0);

    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert!(fx.controller.is_refreshing());
    assert_eq!(fx.calls.get(), 1);
    let snapshot = fx.controller.snapshot();
    assert_eq!(snapshot.position, ARMED_POSITION);
    assert_eq!(snapshot.progress, None);

    let handle = fx.controller.show();
    assert!(!handle.is_complete());

    fx.finish_refresh(Ok(()));
    assert_eq!(fx.controller.mode(), RefreshMode::Done);
    assert!(matches!(handle.try_result(), Some(Ok(()))));

    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
    assert_eq!(fx.controller.session(), None);
    assert_eq!(fx.controller.snapshot().scale, 1.0);
    assert_eq!(fx.calls.get(), 1);
}

#[test]
fn release_before_threshold_cancels() {
    let mut fx = fixture();
    fx.pull(40.0);
    fx.release();
    assert_eq!(fx.controller.mode(), RefreshMode::Canceled);

    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
    assert_eq!(fx.controller.snapshot().position, 0.0);
    assert_eq!(fx.calls.get(), 0);
}

#[test]
fn scrolling_content_cancels_armed_pull() {
    let fx = fixture();
    fx.pull(90.0);
    fx.send(ScrollNotification::update(metrics(4.0), 4.0));
    assert_eq!(fx.controller.mode(), RefreshMode::Canceled);
}

#[test]
fn bounce_back_while_armed_triggers_refresh() {
    let fx = fixture();
    fx.pull(90.0);
    fx.send(ScrollNotification::inertial_update(metrics(0.0), 5.0));
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
}

#[test]
fn bounce_back_while_dragging_only_moves() {
    let fx = fixture();
    fx.pull(20.0);
    fx.send(ScrollNotification::inertial_update(metrics(0.0), 5.0));
    assert_eq!(fx.controller.mode(), RefreshMode::Drag);
    assert!((fx.controller.snapshot().position - 0.15).abs() < 1e-6);
}

#[test]
fn drags_during_refresh_are_ignored() {
    let mut fx = fixture();
    fx.pull(90.0);
    fx.release();
    fx.settle();

    fx.send(ScrollNotification::overscroll(metrics(0.0), -200.0));
    fx.release();
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert_eq!(fx.controller.snapshot().position, ARMED_POSITION);
}

#[test]
fn show_during_cycle_returns_same_handle() {
    let mut fx = fixture();
    let first = fx.controller.show();
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
    let second = fx.controller.show();
    assert!(first.same_cycle(&second));

    fx.settle();
    let third = fx.controller.show_at(IndicatorEdge::Bottom);
    assert!(first.same_cycle(&third));
    assert_eq!(fx.calls.get(), 1);
    assert_eq!(fx.controller.session().map(|s| s.edge), Some(IndicatorEdge::Top));
}

#[test]
fn programmatic_show_uses_requested_edge() {
    let fx = fixture();
    fx.controller.show_at(IndicatorEdge::Bottom);
    let snapshot = fx.controller.snapshot();
    assert_eq!(snapshot.edge, Some(IndicatorEdge::Bottom));
    assert_eq!(snapshot.mode, RefreshMode::Snap);
}

#[test]
fn show_while_done_starts_new_cycle() {
    let mut fx = fixture();
    let first = fx.controller.show();
    fx.settle();
    fx.finish_refresh(Ok(()));
    assert_eq!(fx.controller.mode(), RefreshMode::Done);
    fx.frame();
    fx.frame();
    assert!(fx.controller.snapshot().scale > 0.0);

    let second = fx.controller.show();
    assert!(!first.same_cycle(&second));
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
    assert_eq!(fx.controller.snapshot().scale, 0.0);

    fx.settle();
    assert_eq!(fx.calls.get(), 2);
}

#[test]
fn failed_refresh_still_dismisses() {
    let mut fx = fixture();
    let handle = fx.controller.show();
    fx.settle();
    fx.finish_refresh(Err("offline".to_string()));

    match handle.try_result() {
        Some(Err(RefreshError::Callback(err))) => assert_eq!(err.to_string(), "offline"),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(fx.controller.mode(), RefreshMode::Done);
    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
}

#[test]
fn dispose_resolves_pending_and_freezes_state() {
    let mut fx = fixture();
    let handle = fx.controller.show();
    fx.settle();
    fx.controller.dispose();

    assert!(matches!(handle.try_result(), Some(Err(RefreshError::Disposed))));
    assert!(!fx.controller.is_active());

    fx.finish_refresh(Ok(()));
    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);

    fx.send(ScrollNotification::start(metrics(0.0)));
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert!(matches!(
        fx.controller.show().try_result(),
        Some(Err(RefreshError::Disposed))
    ));
}

#[test]
fn dispose_during_snap_skips_callback() {
    let mut fx = fixture();
    fx.controller.show();
    fx.frame();
    fx.controller.dispose();
    fx.settle();
    assert_eq!(fx.calls.get(), 0);
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
}

#[test]
fn dropping_controller_resolves_pending_handle() {
    let mut fx = fixture();
    let handle = fx.controller.show();
    let replacement = RefreshIndicatorController::new(
        RefreshIndicatorConfig::new(|| async { RefreshResult::Ok(()) }),
        fx.runtime.handle(),
    )
    .expect("valid config");
    let dropped = std::mem::replace(&mut fx.controller, replacement);
    drop(dropped);

    assert!(matches!(handle.try_result(), Some(Err(RefreshError::Disposed))));
    fx.settle();
    assert_eq!(fx.calls.get(), 0);
}

#[test]
fn glow_is_suppressed_only_while_dragging() {
    let fx = fixture();
    let idle = OverscrollIndicatorNotification::new(0, true);
    assert!(!fx.controller.handle_overscroll_indicator_notification(&idle));
    assert!(idle.is_indicator_allowed());

    fx.pull(10.0);
    let leading = OverscrollIndicatorNotification::new(0, true);
    assert!(fx.controller.handle_overscroll_indicator_notification(&leading));
    assert!(!leading.is_indicator_allowed());

    let trailing = OverscrollIndicatorNotification::new(0, false);
    assert!(!fx.controller.handle_overscroll_indicator_notification(&trailing));
    let nested = OverscrollIndicatorNotification::new(1, true);
    assert!(!fx.controller.handle_overscroll_indicator_notification(&nested));
    assert!(nested.is_indicator_allowed());
}

#[test]
fn nested_scrollables_are_filtered() {
    let fx = fixture();
    fx.send(ScrollNotification::start(metrics(0.0)).at_depth(1));
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
}

#[test]
fn listeners_observe_every_transition_in_order() {
    let mut fx = fixture();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        let controller = fx.controller.clone();
        fx.controller.add_mode_listener(move |mode| {
            assert_eq!(controller.mode(), mode);
            seen.borrow_mut().push(mode);
        });
    }

    fx.pull(90.0);
    fx.release();
    fx.settle();
    fx.finish_refresh(Ok(()));
    fx.settle();

    assert_eq!(
        *seen.borrow(),
        vec![
            RefreshMode::Drag,
            RefreshMode::Armed,
            RefreshMode::Snap,
            RefreshMode::Refreshing,
            RefreshMode::Done,
            RefreshMode::Idle,
        ]
    );
}

#[test]
fn listener_showing_on_cancel_starts_a_working_cycle() {
    let mut fx = fixture();
    let shown: Rc<RefCell<Option<RefreshHandle>>> = Rc::default();
    {
        let shown = Rc::clone(&shown);
        let controller = fx.controller.clone();
        fx.controller.add_mode_listener(move |mode| {
            if mode == RefreshMode::Canceled {
                *shown.borrow_mut() = Some(controller.show());
            }
        });
    }

    fx.pull(30.0);
    fx.release();
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);

    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert_eq!(fx.calls.get(), 1);
    assert_eq!(fx.controller.snapshot().position, ARMED_POSITION);

    fx.finish_refresh(Ok(()));
    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
    let handle = shown.borrow_mut().take().expect("listener showed");
    assert!(matches!(handle.try_result(), Some(Ok(()))));
}

#[test]
fn listener_showing_on_done_restarts_at_full_size() {
    let mut fx = fixture();
    let restarted = Rc::new(Cell::new(false));
    {
        let restarted = Rc::clone(&restarted);
        let controller = fx.controller.clone();
        fx.controller.add_mode_listener(move |mode| {
            if mode == RefreshMode::Done && !restarted.replace(true) {
                controller.show();
            }
        });
    }

    fx.pull(90.0);
    fx.release();
    fx.settle();
    fx.finish_refresh(Ok(()));
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);

    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert_eq!(fx.calls.get(), 2);
    let snapshot = fx.controller.snapshot();
    assert_eq!(snapshot.scale, 0.0);
    assert_eq!(snapshot.scale_factor, 1.0);

    fx.finish_refresh(Ok(()));
    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Idle);
    assert_eq!(fx.controller.snapshot().scale, 1.0);
}

#[test]
fn listener_disposing_on_refreshing_skips_the_callback() {
    let mut fx = fixture();
    {
        let controller = fx.controller.clone();
        fx.controller.add_mode_listener(move |mode| {
            if mode == RefreshMode::Refreshing {
                controller.dispose();
            }
        });
    }

    fx.pull(90.0);
    fx.release();
    let handle = fx.controller.show();
    fx.settle();

    assert!(!fx.controller.is_active());
    assert_eq!(fx.calls.get(), 0);
    assert!(fx.gate.borrow().is_none());
    assert_eq!(fx.controller.mode(), RefreshMode::Refreshing);
    assert!(matches!(handle.try_result(), Some(Err(RefreshError::Disposed))));
}

#[test]
fn listener_disposing_on_snap_freezes_the_indicator() {
    let mut fx = fixture();
    {
        let controller = fx.controller.clone();
        fx.controller.add_mode_listener(move |mode| {
            if mode == RefreshMode::Snap {
                controller.dispose();
            }
        });
    }

    let handle = fx.controller.show();
    assert!(matches!(handle.try_result(), Some(Err(RefreshError::Disposed))));
    fx.settle();
    assert_eq!(fx.controller.mode(), RefreshMode::Snap);
    assert_eq!(fx.controller.snapshot().position, 0.0);
    assert_eq!(fx.calls.get(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let runtime = TestRuntime::new();
    let config = RefreshIndicatorConfig::new(|| async { RefreshResult::Ok(()) })
        .with_stroke_width(-1.0);
    let result = RefreshIndicatorController::new(config, runtime.handle());
    assert!(matches!(result, Err(ConfigError::InvalidStrokeWidth { .. })));
}
