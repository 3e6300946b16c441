use std::time::Duration;

use rust_decimal::Decimal;

use super::accumulate_all;
use crate::stream::collector::{average, sum, sum_with, Collector};

#[test]
fn test_sum_integers() {
    let collector = sum(|x: &(i64,)| x.0);
    let mut acc = collector.create_accumulator();
    assert_eq!(collector.finish(&acc), 0);

    let mut undos = accumulate_all(&collector, &mut acc, &[(5,), (-3,), (10,)]);
    assert_eq!(collector.finish(&acc), 12);

    collector.retract(&mut acc, undos.remove(1)).unwrap();
    assert_eq!(collector.finish(&acc), 15);
}

#[test]
fn test_sum_decimal_is_exact() {
    let collector = sum(|x: &Decimal| *x);
    let mut acc = collector.create_accumulator();
    let values = [Decimal::new(1, 1), Decimal::new(2, 1), Decimal::new(3, 1)];

    let undos = accumulate_all(&collector, &mut acc, &values);
    assert_eq!(collector.finish(&acc), Decimal::new(6, 1));

    for undo in undos.into_iter().rev() {
        collector.retract(&mut acc, undo).unwrap();
    }
    assert_eq!(collector.finish(&acc), Decimal::ZERO);
}

#[test]
fn test_sum_durations() {
    let collector = sum(|minutes: &u64| Duration::from_secs(minutes * 60));
    let mut acc = collector.create_accumulator();

    let mut undos = accumulate_all(&collector, &mut acc, &[30, 90]);
    assert_eq!(collector.finish(&acc), Duration::from_secs(7200));

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc), Duration::from_secs(5400));
}

#[test]
fn test_sum_with_custom_zero() {
    // Product over non-zero integers, inverse by division.
    let collector = sum_with(
        |x: &i64| *x,
        1i64,
        |total: &i64, v: &i64| total * v,
        |total: &i64, v: &i64| total / v,
    );
    let mut acc = collector.create_accumulator();
    assert_eq!(collector.finish(&acc), 1);

    let mut undos = accumulate_all(&collector, &mut acc, &[2, 3, 7]);
    assert_eq!(collector.finish(&acc), 42);

    collector.retract(&mut acc, undos.remove(1)).unwrap();
    assert_eq!(collector.finish(&acc), 14);
}

#[test]
fn test_average() {
    let collector = average(|x: &i32| *x);
    let mut acc = collector.create_accumulator();
    assert_eq!(collector.finish(&acc), None);

    let undos = accumulate_all(&collector, &mut acc, &[1, 2, 6]);
    assert_eq!(collector.finish(&acc), Some(3.0));

    for undo in undos {
        collector.retract(&mut acc, undo).unwrap();
    }
    assert_eq!(collector.finish(&acc), None);
}
