//! Testing utilities and harness for the pull-refresh indicator

mod gate;
mod gestures;
mod harness;
mod recorder;
mod scheduler;

pub use gate::RefreshGate;
pub use gestures::{drag_gesture, vertical_metrics};
pub use harness::{RefreshHarness, FRAME_NANOS};
pub use recorder::ModeRecorder;
pub use scheduler::RecordingScheduler;

pub mod prelude {
    pub use crate::gate::RefreshGate;
    pub use crate::gestures::*;
    pub use crate::harness::*;
    pub use crate::recorder::ModeRecorder;
    pub use crate::scheduler::RecordingScheduler;
}
