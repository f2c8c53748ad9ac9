//! Translation of raw scroll notifications into indicator decisions.
//!
//! [`interpret`] is pure: it looks at the current mode and session edge and
//! says what should happen. The controller applies the decision.

use crate::constants::{ARMED_POSITION, DRAG_CONTAINER_EXTENT_PERCENTAGE};
use crate::mode::{IndicatorEdge, RefreshMode};
use crate::notification::{AxisDirection, ScrollNotification, ScrollNotificationKind};

/// What the controller should do in response to one scroll notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDecision {
    /// Nothing to do.
    Ignore,
    /// Start a drag session anchored at `edge` and enter drag mode.
    Begin(IndicatorEdge),
    /// Abandon the drag and retract the indicator.
    Cancel,
    /// Subtract `delta` from the drag offset and recompute the position.
    Drag {
        delta: f32,
        viewport_extent: f32,
        /// Set for updates without drag details; an armed indicator then refreshes.
        release_if_armed: bool,
    },
    /// Trigger a refresh.
    Show,
}

/// Edge the indicator appears at for a given scroll direction.
///
/// Horizontal scrollables never show the indicator.
pub fn resolve_edge(direction: AxisDirection) -> Option<IndicatorEdge> {
    match direction {
        AxisDirection::Down => Some(IndicatorEdge::Top),
        AxisDirection::Up => Some(IndicatorEdge::Bottom),
        AxisDirection::Left | AxisDirection::Right => None,
    }
}

pub fn interpret(
    mode: RefreshMode,
    session_edge: Option<IndicatorEdge>,
    notification: &ScrollNotification,
) -> GestureDecision {
    let metrics = &notification.metrics;
    let tracking = mode.is_tracking_drag();

    let may_begin = matches!(
        notification.kind,
        ScrollNotificationKind::Start | ScrollNotificationKind::Update { .. }
    );
    if may_begin && metrics.at_origin() && mode == RefreshMode::Idle {
        if let Some(edge) = resolve_edge(metrics.axis_direction) {
            return GestureDecision::Begin(edge);
        }
    }

    if resolve_edge(metrics.axis_direction) != session_edge {
        return if tracking {
            GestureDecision::Cancel
        } else {
            GestureDecision::Ignore
        };
    }

    match notification.kind {
        ScrollNotificationKind::Update {
            scroll_delta,
            drag_details,
        } if tracking => {
            if !metrics.at_origin() {
                GestureDecision::Cancel
            } else {
                GestureDecision::Drag {
                    delta: scroll_delta,
                    viewport_extent: metrics.viewport_dimension,
                    release_if_armed: drag_details.is_none(),
                }
            }
        }
        ScrollNotificationKind::Overscroll { overscroll } if tracking => GestureDecision::Drag {
            delta: overscroll,
            viewport_extent: metrics.viewport_dimension,
            release_if_armed: false,
        },
        ScrollNotificationKind::End => match mode {
            RefreshMode::Armed => GestureDecision::Show,
            RefreshMode::Drag => GestureDecision::Cancel,
            _ => GestureDecision::Ignore,
        },
        _ => GestureDecision::Ignore,
    }
}

/// Position value for an accumulated drag `offset` inside a viewport of
/// `viewport_extent`.
///
/// An armed drag never falls below [`ARMED_POSITION`]. The result is always
/// within `[0, 1]`.
pub fn drag_position(offset: f32, viewport_extent: f32, armed: bool) -> f32 {
    let mut raw = offset / (viewport_extent * DRAG_CONTAINER_EXTENT_PERCENTAGE);
    if raw.is_nan() {
        raw = 0.0;
    }
    if armed {
        raw = raw.max(ARMED_POSITION);
    }
    raw.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
