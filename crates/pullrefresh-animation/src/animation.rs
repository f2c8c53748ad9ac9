//! Time-based animations with easing curves.
//!
//! An [`Animatable`] owns a value and, while animating, re-registers itself on
//! the frame clock every frame until the target is reached.

use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh_core::{FrameCallbackRegistration, FrameClock, NANOS_PER_MILLI};
use pullrefresh_graphics::Color;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Color {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Color::lerp(self, target, fraction)
    }
}

/// Scalar values an [`Animatable`] can drive and clamp to bounds.
pub trait AnimationScalar: Lerp + Clone + PartialOrd {
    fn clamp_to(self, lower: &Self, upper: &Self) -> Self {
        if self < *lower {
            lower.clone()
        } else if self > *upper {
            upper.clone()
        } else {
            self
        }
    }
}

impl AnimationScalar for f32 {}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear ramp over `[begin, end]`; 0 before `begin`, 1 after `end`.
    Interval { begin: f32, end: f32 },
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::Interval { begin, end } => {
                if end <= begin {
                    return if fraction < *begin { 0.0 } else { 1.0 };
                }
                ((fraction - begin) / (end - begin)).clamp(0.0, 1.0)
            }
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` matching the x fraction.
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Generic animatable value holder.
///
/// Cloning yields another handle to the same value.
pub struct Animatable<T: AnimationScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: AnimationScalar + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    bounds: Option<(T, T)>,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<Box<dyn FnOnce() + 'static>>,
    /// Bumped whenever the running animation is replaced or stopped.
    generation: u64,
}

impl<T: AnimationScalar + 'static> AnimatableInner<T> {
    fn clamp(&self, value: T) -> T {
        match &self.bounds {
            Some((lower, upper)) => value.clamp_to(lower, upper),
            None => value,
        }
    }

    /// Drops the running animation; its end callback is discarded, not invoked.
    fn interrupt(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.start_time_nanos = None;
        self.on_end = None;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }
}

impl<T: AnimationScalar + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            bounds: None,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            registration: None,
            on_end: None,
            generation: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Restrict every value, including targets, to `[lower, upper]`.
    pub fn with_bounds(self, lower: T, upper: T) -> Self {
        {
            let mut inner = self.inner.borrow_mut();
            inner.bounds = Some((lower, upper));
            let current = inner.clamp(inner.current.clone());
            inner.current = current.clone();
            inner.start = current.clone();
            inner.target = current;
        }
        self
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Animate to `target`, invoking `on_end` once it is reached.
    ///
    /// Any animation already running is interrupted and its end callback is
    /// dropped without being called.
    pub fn animate_to(&self, target: T, spec: AnimationSpec, on_end: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.interrupt();
            inner.start = inner.current.clone();
            inner.target = inner.clamp(target);
            inner.spec = spec;
            inner.on_end = Some(Box::new(on_end));
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to `value`, interrupting any running animation.
    pub fn snap_to(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.interrupt();
        let value = inner.clamp(value);
        inner.current = value.clone();
        inner.start = value.clone();
        inner.target = value;
    }

    /// Stop at the current value without reaching the target.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.interrupt();
        inner.start = inner.current.clone();
        inner.target = inner.current.clone();
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let (clock, generation) = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            (inner.clock.clone(), inner.generation)
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            log::debug!("frame clock unavailable; animation left at its start value");
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, generation: u64, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            if inner.generation != generation {
                return;
            }
            // The runtime consumed this callback; forget it without cancelling.
            if let Some(registration) = inner.registration.take() {
                registration.disarm();
            }

            let spec = inner.spec;
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = spec.delay_millis * NANOS_PER_MILLI;

            if elapsed_nanos < delay_nanos {
                schedule_next = true;
            } else {
                let animation_elapsed = elapsed_nanos - delay_nanos;
                let duration_nanos = (spec.duration_millis * NANOS_PER_MILLI).max(1);
                let linear_progress =
                    (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                let progress = spec.easing.transform(linear_progress);

                let value = inner.start.lerp(&inner.target, progress);
                inner.current = inner.clamp(value);

                if linear_progress >= 1.0 {
                    inner.current = inner.target.clone();
                    inner.start = inner.target.clone();
                    inner.start_time_nanos = None;
                    finished = inner.on_end.take();
                } else {
                    schedule_next = true;
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        } else if let Some(on_end) = finished {
            on_end();
        }
    }
}

impl<T: AnimationScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
