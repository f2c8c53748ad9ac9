//! Pull-to-refresh indicator for scrollable content
//!
//! Feeds scroll notifications through a gesture interpreter and a mode state
//! machine, drives the indicator's position and scale animations, and runs an
//! asynchronous refresh callback once the user pulls far enough.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod handle;
pub mod indicator;
pub mod mode;
pub mod notification;

pub use config::{
    default_scroll_notification_predicate, IndicatorTheme, RefreshIndicatorConfig, RefreshResult,
};
pub use controller::RefreshIndicatorController;
pub use error::{ConfigError, RefreshError};
pub use gesture::GestureDecision;
pub use handle::{RefreshHandle, RefreshOutcome};
pub use indicator::IndicatorSnapshot;
pub use mode::{DragSession, IndicatorEdge, RefreshMode};
pub use notification::{
    AxisDirection, DragDetails, OverscrollIndicatorNotification, ScrollMetrics,
    ScrollNotification, ScrollNotificationKind,
};

pub mod prelude {
    pub use crate::config::{IndicatorTheme, RefreshIndicatorConfig, RefreshResult};
    pub use crate::controller::RefreshIndicatorController;
    pub use crate::error::RefreshError;
    pub use crate::handle::RefreshHandle;
    pub use crate::indicator::IndicatorSnapshot;
    pub use crate::mode::{IndicatorEdge, RefreshMode};
    pub use crate::notification::{
        AxisDirection, OverscrollIndicatorNotification, ScrollMetrics, ScrollNotification,
    };
}
