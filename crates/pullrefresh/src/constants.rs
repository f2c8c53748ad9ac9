//! Geometry and timing constants for the refresh indicator.
//!
//! Drag distances are expressed relative to the viewport so the gesture feels
//! the same on small and large scroll containers.

/// Fraction of the viewport extent the user must drag for the position
/// animation to reach 1.0.
pub const DRAG_CONTAINER_EXTENT_PERCENTAGE: f32 = 0.25;

/// How much the indicator may grow relative to its resting size while dragged.
pub const DRAG_SIZE_FACTOR_LIMIT: f32 = 1.5;

/// Position value at which the value color becomes fully opaque and the drag
/// arms a refresh. The indicator also snaps here while refreshing.
pub const ARMED_POSITION: f32 = 1.0 / DRAG_SIZE_FACTOR_LIMIT;

/// Duration of the snap to [`ARMED_POSITION`] once a refresh is triggered.
pub const INDICATOR_SNAP_DURATION_MILLIS: u64 = 150;

/// Duration of both dismissal animations (shrink after refresh, retract on cancel).
pub const INDICATOR_SCALE_DURATION_MILLIS: u64 = 200;

/// Progress shown by the determinate indicator when the position value is 1.0.
pub const MAX_DETERMINATE_PROGRESS: f32 = 0.75;

/// Default distance from the leading edge at which the indicator settles.
pub const DEFAULT_DISPLACEMENT: f32 = 40.0;

/// Default stroke width of the progress arc.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
