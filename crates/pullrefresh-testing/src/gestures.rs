//! Scripted scroll gestures.

use pullrefresh::{AxisDirection, ScrollMetrics, ScrollNotification};

/// Metrics of a vertical list scrolled to its top.
pub fn vertical_metrics(viewport_dimension: f32) -> ScrollMetrics {
    ScrollMetrics::new(AxisDirection::Down, 0.0, viewport_dimension)
}

/// A full user drag at the scroll origin: start, `steps` overscroll events
/// adding up to `distance` pixels of pull, then end.
pub fn drag_gesture(metrics: ScrollMetrics, distance: f32, steps: usize) -> Vec<ScrollNotification> {
    let steps = steps.max(1);
    let step = distance / steps as f32;
    let mut gesture = Vec::with_capacity(steps + 2);
    gesture.push(ScrollNotification::start(metrics));
    gesture.extend((0..steps).map(|_| ScrollNotification::overscroll(metrics, -step)));
    gesture.push(ScrollNotification::end(metrics));
    gesture
}
