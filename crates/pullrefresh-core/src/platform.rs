//! Platform abstraction traits for the pull-refresh runtime.
//!
//! The host platform decides when frames are produced. The runtime only asks
//! for one whenever it has frame callbacks or UI work queued.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing on behalf
/// of the runtime. They must be safe to use from multiple threads because the
/// task waker may be invoked from anywhere.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests.
///
/// Useful for hosts that pump the runtime unconditionally every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
