//! Unit types: Dp and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Dp {
    fn default() -> Self {
        Self::ZERO
    }
}
