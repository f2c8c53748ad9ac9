use super::*;

#[test]
fn harness_starts_idle_with_no_frames_requested() {
    let harness = RefreshHarness::new();
    assert_eq!(harness.mode(), RefreshMode::Idle);
    assert_eq!(harness.gate().calls(), 0);
    assert!(harness.recorder().modes().is_empty());
    assert!(!harness.scheduler().take_frame_request());
}

#[test]
fn animations_request_frames() {
    let mut harness = RefreshHarness::new();
    harness.pull_and_release(30.0, 3);
    assert_eq!(harness.mode(), RefreshMode::Canceled);
    assert!(harness.scheduler().take_frame_request());

    harness.pump_until_idle();
    assert_eq!(harness.mode(), RefreshMode::Idle);
    assert_eq!(
        harness.recorder().modes(),
        vec![RefreshMode::Drag, RefreshMode::Canceled, RefreshMode::Idle]
    );
}

#[test]
fn advance_millis_rounds_up_to_whole_frames() {
    let mut harness = RefreshHarness::new();
    harness.advance_millis(20);
    assert_eq!(harness.frame_time_nanos, 2 * FRAME_NANOS);
}

#[test]
fn gate_resolves_only_running_refresh() {
    let mut harness = RefreshHarness::new();
    assert!(!harness.complete_refresh());

    harness.controller().show();
    harness.pump_until_idle();
    assert!(harness.gate().is_waiting());
    assert!(harness.complete_refresh());
    assert!(!harness.gate().is_waiting());
    assert_eq!(harness.mode(), RefreshMode::Done);
}
