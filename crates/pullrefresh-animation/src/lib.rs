//! Animation system for the pull-refresh indicator
//!
//! Time-based tweens advanced by the runtime's frame clock. Values are plain
//! numbers; rendering reads them whenever it draws.

mod animation;
mod tween;

pub use animation::*;
pub use tween::Tween;
