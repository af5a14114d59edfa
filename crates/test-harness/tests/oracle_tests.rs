//! Tests for verification oracles.

use test_harness::helpers::*;
use test_harness::oracle::*;
use test_harness::SweepBuilder;

#[test]
fn sweep_checks_pass_for_plain_box() {
    let sweep = SweepBuilder::new("box", rect_profile(4.0, 3.0))
        .through(&straight_points(3, 50.0))
        .unwrap()
        .build()
        .unwrap();
    for verdict in run_sweep_checks(&sweep) {
        assert!(verdict.passed, "{}: {}", verdict.oracle_name, verdict.detail);
    }
}

#[test]
fn light_slot_flags_fail_without_a_slot() {
    // A rectangle has curve 4 but no curve 5 beside it.
    let sweep = SweepBuilder::new("box", rect_profile(4.0, 3.0))
        .through(&straight_points(2, 50.0))
        .unwrap()
        .build()
        .unwrap();
    assert!(!check_light_slot_flags(&sweep).passed);
}

#[test]
fn wrap_chain_fails_on_full_path() {
    let sweep = SweepBuilder::light_slot("slot")
        .through(&straight_points(2, 50.0))
        .unwrap()
        .build()
        .unwrap();
    let verdict = check_wrap_chain(&sweep, 2);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("4>5-1"), "{}", verdict.detail);
}

#[test]
fn path_continuity_reports_gap() {
    let mut path = polyline(&straight_points(2, 10.0), 0.0).unwrap();
    path.push(line((30.0, 0.0, 0.0), (40.0, 0.0, 0.0)).unwrap());
    let verdict = check_path_continuity(&path, 1e-9);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("[1]"), "{}", verdict.detail);
}
