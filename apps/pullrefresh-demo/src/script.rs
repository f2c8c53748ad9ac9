//! The gestures the demo plays back, keyed by milliseconds since launch.

use pullrefresh::{AxisDirection, ScrollMetrics, ScrollNotification};

const VIEWPORT: f32 = 640.0;

pub enum ScriptStep {
    Scroll(ScrollNotification),
    /// Programmatic refresh, as a "refresh" menu item would trigger.
    Show,
}

pub struct ScriptEvent {
    pub at_millis: u64,
    pub step: ScriptStep,
}

fn metrics() -> ScrollMetrics {
    ScrollMetrics::new(AxisDirection::Down, 0.0, VIEWPORT)
}

fn drag(start_millis: u64, distance: f32, steps: u64, events: &mut Vec<ScriptEvent>) -> u64 {
    let step = distance / steps as f32;
    events.push(ScriptEvent {
        at_millis: start_millis,
        step: ScriptStep::Scroll(ScrollNotification::start(metrics())),
    });
    let mut at = start_millis;
    for _ in 0..steps {
        at += 16;
        events.push(ScriptEvent {
            at_millis: at,
            step: ScriptStep::Scroll(ScrollNotification::overscroll(metrics(), -step)),
        });
    }
    at += 16;
    events.push(ScriptEvent {
        at_millis: at,
        step: ScriptStep::Scroll(ScrollNotification::end(metrics())),
    });
    at
}

/// A full pull that refreshes, a short pull that is abandoned, then a
/// programmatic refresh.
pub fn build() -> Vec<ScriptEvent> {
    let mut events = Vec::new();
    drag(100, 220.0, 15, &mut events);
    drag(1_800, 60.0, 6, &mut events);
    events.push(ScriptEvent {
        at_millis: 2_600,
        step: ScriptStep::Show,
    });
    events
}
