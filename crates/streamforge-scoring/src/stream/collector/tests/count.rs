use streamforge_core::StreamError;
use streamforge_test::{people, Person};

use super::accumulate_all;
use crate::stream::collector::{count, count_distinct, count_long, Collector};

#[test]
fn test_count_defaults_to_zero() {
    let collector = count::<(i32,)>();
    assert_eq!(collector.finish(&collector.create_accumulator()), 0);

    let collector = count_long::<(i32,)>();
    assert_eq!(collector.finish(&collector.create_accumulator()), 0u64);
}

#[test]
fn test_count_long_counts() {
    let collector = count_long::<&str>();
    let mut acc = collector.create_accumulator();
    let undos = accumulate_all(&collector, &mut acc, &["a", "b", "a"]);
    assert_eq!(collector.finish(&acc), 3u64);

    for undo in undos {
        collector.retract(&mut acc, undo).unwrap();
    }
    assert_eq!(collector.finish(&acc), 0u64);
}

#[test]
fn test_count_retract_on_wrong_accumulator_underflows() {
    let collector = count::<i32>();
    let mut full = collector.create_accumulator();
    let mut empty = collector.create_accumulator();

    let undo = collector.accumulate(&mut full, &1);
    let err = collector.retract(&mut empty, undo).unwrap_err();
    assert!(matches!(err, StreamError::Underflow { type_name: "usize" }));
}

#[test]
fn test_count_distinct_ages() {
    let collector = count_distinct(|p: &Person| p.age);
    let mut acc = collector.create_accumulator();
    assert_eq!(collector.finish(&acc), 0);

    // Ages [20, 25, 30, 30, 20]
    let mut undos = accumulate_all(&collector, &mut acc, &people());
    assert_eq!(collector.finish(&acc), 3);

    let dana = undos.remove(3);
    let cory = undos.remove(2);
    collector.retract(&mut acc, dana).unwrap();
    assert_eq!(collector.finish(&acc), 3);

    collector.retract(&mut acc, cory).unwrap();
    assert_eq!(collector.finish(&acc), 2);
}

#[test]
fn test_count_distinct_foreign_undo_underflows() {
    let collector = count_distinct(|x: &i32| *x);
    let mut a = collector.create_accumulator();
    let mut b = collector.create_accumulator();

    let undo = collector.accumulate(&mut a, &7);
    assert!(matches!(
        collector.retract(&mut b, undo),
        Err(StreamError::Underflow { .. })
    ));
}
