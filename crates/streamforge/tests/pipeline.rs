//! End-to-end: join shifts with themselves, then aggregate per employee.

use streamforge::prelude::*;
use streamforge_test::{shifts, Shift};

#[test]
fn test_overlapping_shifts_per_employee() {
    streamforge::init_tracing();
    streamforge::init_tracing();

    let config = StreamConfig::default().with_environment_mode(EnvironmentMode::FullAssert);
    let joiner = equal_bi(|l: &(Shift,)| l.0.employee, |r: &Shift| r.employee).and(overlapping(
        |l: &(Shift,)| l.0.start,
        |l: &(Shift,)| l.0.end,
        |r: &Shift| r.start,
        |r: &Shift| r.end,
    ));
    let mut join = JoinNode::from_config(joiner, &config);
    let mut conflicts = GroupNode::new(
        |pair: &(Shift, Shift)| pair.0.employee,
        conditionally(|pair: &(Shift, Shift)| pair.0.id < pair.1.id, count()),
    );

    let all = shifts();
    for shift in &all {
        let id = TupleId(shift.id as u64);
        for event in join.insert_right(id, shift.clone()).unwrap() {
            if let JoinEvent::Inserted { id, tuple } = event {
                conflicts.insert(id, &tuple).unwrap();
            }
        }
        for event in join.insert_left(id, uni(shift.clone())).unwrap() {
            if let JoinEvent::Inserted { id, tuple } = event {
                conflicts.insert(id, &tuple).unwrap();
            }
        }
    }

    // Shifts 0 and 1 of employee 1 overlap on [6, 8).
    assert_eq!(conflicts.result(&Some(1)), Some(1));
    // Every shift overlaps itself, which the condition filters out.
    assert_eq!(conflicts.result(&Some(2)), Some(0));

    for event in join.retract_right(TupleId(1)).unwrap() {
        conflicts.retract(event.id()).unwrap();
    }
    assert_eq!(conflicts.result(&Some(1)), Some(0));
}

#[test]
fn test_config_error_converts_to_stream_error() {
    let err = StreamConfig::from_yaml_str("environment_mode: full_assert\nindex_joins: false\n")
        .unwrap_err();
    let err: StreamError = err.into();
    assert!(matches!(err, StreamError::Config(_)));
}
