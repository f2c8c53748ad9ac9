//! Values the rendering layer needs to draw the indicator.

use pullrefresh_animation::{Easing, Tween};
use pullrefresh_graphics::{Color, Dp};

use crate::constants::{ARMED_POSITION, DRAG_SIZE_FACTOR_LIMIT, MAX_DETERMINATE_PROGRESS};
use crate::controller::ControllerInner;
use crate::mode::{IndicatorEdge, RefreshMode};

/// Indicator color for a given position value.
///
/// Fades from transparent to opaque over `[0, ARMED_POSITION]`; the drag arms
/// exactly when this color becomes fully opaque.
pub fn value_color(color: Color, position: f32) -> Color {
    Tween::new(color.with_alpha(0.0), color.with_alpha(1.0))
        .with_easing(Easing::Interval {
            begin: 0.0,
            end: ARMED_POSITION,
        })
        .transform(position)
}

/// Fraction of the progress arc drawn while dragging.
pub fn determinate_progress(position: f32) -> f32 {
    Tween::new(0.0, MAX_DETERMINATE_PROGRESS).transform(position)
}

/// Immutable picture of the indicator at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub mode: RefreshMode,
    /// `None` while idle.
    pub edge: Option<IndicatorEdge>,
    /// Raw position animation value in `[0, 1]`.
    pub position: f32,
    /// Size factor of the indicator: `position * DRAG_SIZE_FACTOR_LIMIT`.
    pub position_factor: f32,
    /// Raw scale animation value in `[0, 1]`; 1 means fully dismissed.
    pub scale: f32,
    /// Drawing scale: `1 - scale`.
    pub scale_factor: f32,
    /// Determinate arc fraction, or `None` for the indeterminate spinner.
    pub progress: Option<f32>,
    pub value_color: Color,
    pub background_color: Color,
    pub stroke_width: f32,
    pub displacement: Dp,
    pub edge_offset: Dp,
    pub semantics_label: Option<String>,
    pub semantics_value: Option<String>,
}

impl IndicatorSnapshot {
    pub(crate) fn capture(
        inner: &ControllerInner,
        mode: RefreshMode,
        edge: Option<IndicatorEdge>,
    ) -> Self {
        let config = &inner.config;
        let position = inner.position.value();
        let scale = inner.scale.value();
        let progress = if mode.is_indeterminate() {
            None
        } else {
            Some(determinate_progress(position))
        };
        Self {
            mode,
            edge,
            position,
            position_factor: position * DRAG_SIZE_FACTOR_LIMIT,
            scale,
            scale_factor: 1.0 - scale,
            progress,
            value_color: value_color(config.color(), position),
            background_color: config.background_color(),
            stroke_width: config.stroke_width(),
            displacement: config.displacement(),
            edge_offset: config.edge_offset(),
            semantics_label: config.semantics_label().map(str::to_owned),
            semantics_value: config.semantics_value().map(str::to_owned),
        }
    }

    /// Whether anything should be drawn.
    pub fn is_visible(&self) -> bool {
        self.mode != RefreshMode::Idle
    }

    /// Distance the indicator travels into the viewport, measured from the
    /// resting edge offset.
    pub fn travel(&self) -> Dp {
        Dp(self.position_factor * self.displacement.value())
    }
}

#[cfg(test)]
#[path = "tests/indicator_tests.rs"]
mod tests;
