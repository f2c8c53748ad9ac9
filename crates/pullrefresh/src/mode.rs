use std::fmt;

/// Phase of the refresh indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshMode {
    /// No drag session; the indicator is hidden.
    #[default]
    Idle,
    /// The user is pulling but has not pulled far enough to refresh.
    Drag,
    /// Released now, the pull would trigger a refresh.
    Armed,
    /// Animating to the refresh position before the callback runs.
    Snap,
    /// The refresh callback is running.
    Refreshing,
    /// The callback finished; the indicator is shrinking away.
    Done,
    /// The pull was abandoned; the indicator is retracting.
    Canceled,
}

impl RefreshMode {
    /// Modes in which scroll notifications move the indicator.
    pub fn is_tracking_drag(self) -> bool {
        matches!(self, RefreshMode::Drag | RefreshMode::Armed)
    }

    /// Modes in which a refresh cycle is in flight and `show` is a no-op.
    pub fn is_cycle_in_flight(self) -> bool {
        matches!(self, RefreshMode::Snap | RefreshMode::Refreshing)
    }

    /// Modes drawn with an indeterminate spinner instead of a progress arc.
    pub fn is_indeterminate(self) -> bool {
        matches!(self, RefreshMode::Refreshing | RefreshMode::Done)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RefreshMode::Idle => "idle",
            RefreshMode::Drag => "drag",
            RefreshMode::Armed => "armed",
            RefreshMode::Snap => "snap",
            RefreshMode::Refreshing => "refreshing",
            RefreshMode::Done => "done",
            RefreshMode::Canceled => "canceled",
        }
    }
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge of the viewport the indicator is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEdge {
    Top,
    Bottom,
}

/// State of one pull, from session start until the indicator is idle again.
///
/// Offset and edge live together so neither can exist without the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Accumulated overscroll; positive values pull the indicator in.
    pub offset: f32,
    pub edge: IndicatorEdge,
}

impl DragSession {
    pub fn new(edge: IndicatorEdge) -> Self {
        Self { offset: 0.0, edge }
    }
}
