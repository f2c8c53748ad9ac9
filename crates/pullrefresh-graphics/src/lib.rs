//! Pure math/data for drawing & units in the pull-refresh indicator
//!
//! Colors and density-independent units shared by the controller and the
//! rendering layer that paints the indicator.

mod color;
mod unit;

pub use color::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::unit::Dp;
}
