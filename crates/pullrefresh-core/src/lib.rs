//! Core runtime services for the pull-refresh indicator.
//!
//! Everything here is single-threaded: state lives in `Rc`/`RefCell`, frame
//! callbacks and UI tasks run when the host drains them, and `!Send` futures
//! are polled on the same thread.

mod completer;
mod frame_clock;
mod lifecycle;
mod platform;
mod runtime;

pub use completer::{Completer, CompletionFuture};
pub use frame_clock::{FrameClock, FrameCallbackRegistration, NextFrame};
pub use lifecycle::LifecycleScope;
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle, TaskHandle, TestRuntime};

/// Nanoseconds in one millisecond, for converting animation durations.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
