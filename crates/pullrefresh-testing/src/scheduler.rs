use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pullrefresh_core::RuntimeScheduler;

/// Scheduler that records frame requests instead of driving a display.
pub struct RecordingScheduler {
    frame_requested: AtomicBool,
    request_count: AtomicUsize,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Total number of frame requests seen.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Default for RecordingScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordingScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .field("request_count", &self.request_count())
            .finish()
    }
}

impl RuntimeScheduler for RecordingScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }
}
