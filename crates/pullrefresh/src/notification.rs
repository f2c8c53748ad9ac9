//! Notifications delivered by the scroll container the indicator decorates.

use std::cell::Cell;

/// Direction in which scroll offsets grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    /// Content scrolls upward; the scroll origin is at the bottom.
    Up,
    /// Content scrolls downward; the scroll origin is at the top.
    Down,
    Left,
    Right,
}

/// Scroll position summary attached to every notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub axis_direction: AxisDirection,
    /// Content extent scrolled past the leading edge; 0 at the scroll origin.
    pub extent_before: f32,
    /// Size of the viewport along the scroll axis.
    pub viewport_dimension: f32,
}

impl ScrollMetrics {
    pub fn new(axis_direction: AxisDirection, extent_before: f32, viewport_dimension: f32) -> Self {
        Self {
            axis_direction,
            extent_before,
            viewport_dimension,
        }
    }

    pub fn at_origin(&self) -> bool {
        self.extent_before <= 0.0
    }
}

/// Present when a scroll event comes from an active user drag.
///
/// Its absence on an update marks inertial or programmatic scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDetails {
    pub primary_delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollNotificationKind {
    Start,
    Update {
        scroll_delta: f32,
        drag_details: Option<DragDetails>,
    },
    Overscroll {
        overscroll: f32,
    },
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollNotification {
    pub kind: ScrollNotificationKind,
    pub metrics: ScrollMetrics,
    /// Number of scrollables between the emitter and the indicator; 0 is direct.
    pub depth: usize,
}

impl ScrollNotification {
    pub fn new(kind: ScrollNotificationKind, metrics: ScrollMetrics) -> Self {
        Self {
            kind,
            metrics,
            depth: 0,
        }
    }

    pub fn start(metrics: ScrollMetrics) -> Self {
        Self::new(ScrollNotificationKind::Start, metrics)
    }

    /// Update caused by the user's finger moving by `scroll_delta`.
    pub fn update(metrics: ScrollMetrics, scroll_delta: f32) -> Self {
        Self::new(
            ScrollNotificationKind::Update {
                scroll_delta,
                drag_details: Some(DragDetails {
                    primary_delta: -scroll_delta,
                }),
            },
            metrics,
        )
    }

    /// Update produced by scroll physics (fling or bounce-back), not by a touch.
    pub fn inertial_update(metrics: ScrollMetrics, scroll_delta: f32) -> Self {
        Self::new(
            ScrollNotificationKind::Update {
                scroll_delta,
                drag_details: None,
            },
            metrics,
        )
    }

    pub fn overscroll(metrics: ScrollMetrics, overscroll: f32) -> Self {
        Self::new(ScrollNotificationKind::Overscroll { overscroll }, metrics)
    }

    pub fn end(metrics: ScrollMetrics) -> Self {
        Self::new(ScrollNotificationKind::End, metrics)
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Asks whether the container may paint its own overscroll glow.
///
/// Handlers call [`OverscrollIndicatorNotification::disallow_indicator`] to
/// suppress it.
#[derive(Debug)]
pub struct OverscrollIndicatorNotification {
    pub depth: usize,
    /// Whether the glow would appear at the leading (origin) edge.
    pub leading: bool,
    allowed: Cell<bool>,
}

impl OverscrollIndicatorNotification {
    pub fn new(depth: usize, leading: bool) -> Self {
        Self {
            depth,
            leading,
            allowed: Cell::new(true),
        }
    }

    pub fn disallow_indicator(&self) {
        self.allowed.set(false);
    }

    pub fn is_indicator_allowed(&self) -> bool {
        self.allowed.get()
    }
}
