use crate::{Easing, Lerp};

/// Maps an animation fraction onto a value range, optionally through a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp + Clone> {
    pub begin: T,
    pub end: T,
    pub easing: Easing,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(begin: T, end: T) -> Self {
        Self {
            begin,
            end,
            easing: Easing::LinearEasing,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn transform(&self, fraction: f32) -> T {
        let t = self.easing.transform(fraction);
        if t <= 0.0 {
            return self.begin.clone();
        }
        if t >= 1.0 {
            return self.end.clone();
        }
        self.begin.lerp(&self.end, t)
    }
}
