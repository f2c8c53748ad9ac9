//! Indicator configuration.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use pullrefresh_graphics::{Color, Dp};

use crate::constants::{DEFAULT_DISPLACEMENT, DEFAULT_STROKE_WIDTH};
use crate::error::ConfigError;
use crate::notification::ScrollNotification;

/// Outcome of one run of the refresh callback.
pub type RefreshResult = Result<(), Box<dyn Error>>;

/// Future returned by the refresh callback.
pub type RefreshFuture = Pin<Box<dyn Future<Output = RefreshResult>>>;

pub type RefreshCallback = Rc<dyn Fn() -> RefreshFuture>;

pub type NotificationPredicate = Rc<dyn Fn(&ScrollNotification) -> bool>;

/// Accepts only notifications emitted directly by the decorated scrollable.
pub fn default_scroll_notification_predicate(notification: &ScrollNotification) -> bool {
    notification.depth == 0
}

/// Fallback colors used when the config leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTheme {
    pub accent: Color,
    pub surface: Color,
}

impl Default for IndicatorTheme {
    fn default() -> Self {
        Self {
            accent: Color::from_rgb_u8(0x21, 0x96, 0xF3),
            surface: Color::WHITE,
        }
    }
}

#[derive(Clone)]
pub struct RefreshIndicatorConfig {
    on_refresh: RefreshCallback,
    displacement: Dp,
    edge_offset: Dp,
    color: Option<Color>,
    background_color: Option<Color>,
    theme: IndicatorTheme,
    notification_predicate: NotificationPredicate,
    semantics_label: Option<String>,
    semantics_value: Option<String>,
    stroke_width: f32,
}

impl RefreshIndicatorConfig {
    /// Config invoking `on_refresh` each time a refresh is triggered.
    pub fn new<F, Fut>(on_refresh: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = RefreshResult> + 'static,
    {
        Self {
            on_refresh: Rc::new(move || Box::pin(on_refresh()) as RefreshFuture),
            displacement: Dp(DEFAULT_DISPLACEMENT),
            edge_offset: Dp::ZERO,
            color: None,
            background_color: None,
            theme: IndicatorTheme::default(),
            notification_predicate: Rc::new(default_scroll_notification_predicate),
            semantics_label: None,
            semantics_value: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn with_displacement(mut self, displacement: Dp) -> Self {
        self.displacement = displacement;
        self
    }

    /// Offset of the indicator's resting area from the viewport edge, e.g. to
    /// clear an app bar.
    pub fn with_edge_offset(mut self, edge_offset: Dp) -> Self {
        self.edge_offset = edge_offset;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_theme(mut self, theme: IndicatorTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_notification_predicate(
        mut self,
        predicate: impl Fn(&ScrollNotification) -> bool + 'static,
    ) -> Self {
        self.notification_predicate = Rc::new(predicate);
        self
    }

    pub fn with_semantics_label(mut self, label: impl Into<String>) -> Self {
        self.semantics_label = Some(label.into());
        self
    }

    pub fn with_semantics_value(mut self, value: impl Into<String>) -> Self {
        self.semantics_value = Some(value.into());
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn displacement(&self) -> Dp {
        self.displacement
    }

    pub fn edge_offset(&self) -> Dp {
        self.edge_offset
    }

    /// Foreground color, falling back to the theme accent.
    pub fn color(&self) -> Color {
        self.color.unwrap_or(self.theme.accent)
    }

    /// Background color, falling back to the theme surface.
    pub fn background_color(&self) -> Color {
        self.background_color.unwrap_or(self.theme.surface)
    }

    pub fn semantics_label(&self) -> Option<&str> {
        self.semantics_label.as_deref()
    }

    pub fn semantics_value(&self) -> Option<&str> {
        self.semantics_value.as_deref()
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn accepts(&self, notification: &ScrollNotification) -> bool {
        (self.notification_predicate)(notification)
    }

    pub(crate) fn start_refresh(&self) -> RefreshFuture {
        (self.on_refresh)()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let displacement = self.displacement.value();
        if !displacement.is_finite() || displacement < 0.0 {
            return Err(ConfigError::InvalidDisplacement {
                value: displacement,
            });
        }
        let edge_offset = self.edge_offset.value();
        if !edge_offset.is_finite() || edge_offset < 0.0 {
            return Err(ConfigError::InvalidEdgeOffset { value: edge_offset });
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ConfigError::InvalidStrokeWidth {
                value: self.stroke_width,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for RefreshIndicatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshIndicatorConfig")
            .field("displacement", &self.displacement)
            .field("edge_offset", &self.edge_offset)
            .field("color", &self.color)
            .field("background_color", &self.background_color)
            .field("theme", &self.theme)
            .field("semantics_label", &self.semantics_label)
            .field("semantics_value", &self.semantics_value)
            .field("stroke_width", &self.stroke_width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
