use std::sync::Arc;

use pullrefresh::{
    ConfigError, IndicatorSnapshot, RefreshIndicatorConfig, RefreshIndicatorController,
    RefreshMode, ScrollMetrics, ScrollNotification,
};
use pullrefresh_core::{Runtime, RuntimeHandle};

use crate::gate::RefreshGate;
use crate::gestures::{drag_gesture, vertical_metrics};
use crate::recorder::ModeRecorder;
use crate::scheduler::RecordingScheduler;

/// Duration of one simulated frame (60 Hz).
pub const FRAME_NANOS: u64 = 16_666_667;

const DEFAULT_VIEWPORT: f32 = 400.0;
const MAX_IDLE_FRAMES: usize = 1_000;

/// Headless harness driving a [`RefreshIndicatorController`] with scripted
/// gestures and a simulated frame clock.
///
/// The refresh callback is a [`RefreshGate`], so each refresh stays pending
/// until the test calls [`RefreshGate::succeed`] or [`RefreshGate::fail`].
pub struct RefreshHarness {
    runtime: Runtime,
    scheduler: Arc<RecordingScheduler>,
    controller: RefreshIndicatorController,
    gate: RefreshGate,
    recorder: ModeRecorder,
    metrics: ScrollMetrics,
    frame_time_nanos: u64,
}

impl RefreshHarness {
    /// Harness with the default config and a 400px vertical viewport.
    pub fn new() -> Self {
        match Self::with_config(|config| config) {
            Ok(harness) => harness,
            Err(err) => panic!("default indicator config rejected: {err}"),
        }
    }

    /// Harness whose config is adjusted by `customize` before the controller
    /// is created. The refresh callback is always the harness gate.
    pub fn with_config(
        customize: impl FnOnce(RefreshIndicatorConfig) -> RefreshIndicatorConfig,
    ) -> Result<Self, ConfigError> {
        let scheduler = Arc::new(RecordingScheduler::new());
        let runtime = Runtime::new(scheduler.clone());
        let gate = RefreshGate::new();
        let controller =
            RefreshIndicatorController::new(customize(gate.config()), runtime.handle())?;
        let recorder = ModeRecorder::attach(&controller);
        Ok(Self {
            runtime,
            scheduler,
            controller,
            gate,
            recorder,
            metrics: vertical_metrics(DEFAULT_VIEWPORT),
            frame_time_nanos: 0,
        })
    }

    pub fn controller(&self) -> &RefreshIndicatorController {
        &self.controller
    }

    pub fn gate(&self) -> &RefreshGate {
        &self.gate
    }

    pub fn recorder(&self) -> &ModeRecorder {
        &self.recorder
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> &RecordingScheduler {
        &self.scheduler
    }

    pub fn mode(&self) -> RefreshMode {
        self.controller.mode()
    }

    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.controller.snapshot()
    }

    /// Metrics attached to the notifications the harness sends.
    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    pub fn set_metrics(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
    }

    /// Deliver `notification` and process any UI work it queued.
    pub fn send(&self, notification: ScrollNotification) -> bool {
        let handled = self.controller.handle_scroll_notification(&notification);
        self.runtime.handle().drain_ui();
        handled
    }

    pub fn start_drag(&self) {
        self.send(ScrollNotification::start(self.metrics));
    }

    /// Pull the indicator by `pixels` past the scroll origin.
    pub fn drag_by(&self, pixels: f32) {
        self.send(ScrollNotification::overscroll(self.metrics, -pixels));
    }

    /// Scroll physics moving the content by `scroll_delta` with no finger down.
    pub fn bounce(&self, scroll_delta: f32) {
        self.send(ScrollNotification::inertial_update(self.metrics, scroll_delta));
    }

    pub fn release(&self) {
        self.send(ScrollNotification::end(self.metrics));
    }

    /// Start a drag and pull `distance` pixels in one step, without releasing.
    pub fn pull(&self, distance: f32) {
        self.start_drag();
        self.drag_by(distance);
    }

    /// Perform a complete pull of `distance` pixels split over `steps` events.
    pub fn pull_and_release(&self, distance: f32, steps: usize) {
        for notification in drag_gesture(self.metrics, distance, steps) {
            self.send(notification);
        }
    }

    /// Drain frame callbacks for the next frame and run resulting UI work.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(self.frame_time_nanos);
        handle.drain_ui();
    }

    /// Advance whole frames until at least `millis` of frame time has passed.
    pub fn advance_millis(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Run frames until no animation is scheduled.
    ///
    /// A pending refresh callback does not keep the harness busy.
    pub fn pump_until_idle(&mut self) {
        let handle = self.runtime.handle();
        for _ in 0..MAX_IDLE_FRAMES {
            handle.drain_ui();
            if !handle.has_frame_callbacks() {
                return;
            }
            self.advance_frame();
        }
        panic!("pump_until_idle: animations still running after {MAX_IDLE_FRAMES} frames");
    }

    /// Resolve the running refresh successfully and process the result.
    pub fn complete_refresh(&self) -> bool {
        let resolved = self.gate.succeed();
        self.runtime.handle().drain_ui();
        resolved
    }

    /// Resolve the running refresh with an error and process the result.
    pub fn fail_refresh(&self, message: &str) -> bool {
        let resolved = self.gate.fail(message);
        self.runtime.handle().drain_ui();
        resolved
    }

    /// Drop the controller, as when the decorated scrollable is unmounted.
    pub fn unmount(self) -> (RefreshGate, Runtime) {
        let Self { runtime, gate, .. } = self;
        (gate, runtime)
    }
}

impl Default for RefreshHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/harness_tests.rs"]
mod tests;
