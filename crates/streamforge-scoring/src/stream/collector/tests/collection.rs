use std::collections::{BTreeSet, HashSet};

use streamforge_core::StreamError;

use super::accumulate_all;
use crate::stream::collector::{to_list, to_set, to_sorted_set, to_sorted_set_by, Collector};

#[test]
fn test_to_list_keeps_duplicates() {
    let collector = to_list(|x: &(u8,)| x.0);
    let mut acc = collector.create_accumulator();
    assert!(collector.finish(&acc).is_empty());

    let mut undos = accumulate_all(&collector, &mut acc, &[(1,), (2,), (1,), (3,)]);
    assert_eq!(collector.finish(&acc), vec![1, 2, 1, 3]);

    // Undoing the second `1` removes the first equal occurrence.
    collector.retract(&mut acc, undos.remove(2)).unwrap();
    assert_eq!(collector.finish(&acc), vec![2, 1, 3]);

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc), vec![2, 3]);
}

#[test]
fn test_to_list_absent_value_underflows() {
    let collector = to_list(|x: &i32| *x);
    let mut a = collector.create_accumulator();
    let mut b = collector.create_accumulator();

    let undo = collector.accumulate(&mut a, &4);
    assert!(matches!(
        collector.retract(&mut b, undo),
        Err(StreamError::Underflow { .. })
    ));
}

#[test]
fn test_to_set_keeps_value_until_last_retract() {
    let collector = to_set(|s: &&str| s.to_lowercase());
    let mut acc = collector.create_accumulator();

    let mut undos = accumulate_all(&collector, &mut acc, &["Ann", "ANN", "Beth"]);
    assert_eq!(
        collector.finish(&acc),
        HashSet::from(["ann".to_string(), "beth".to_string()])
    );

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert!(collector.finish(&acc).contains("ann"));

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc), HashSet::from(["beth".to_string()]));
}

#[test]
fn test_to_sorted_set() {
    let collector = to_sorted_set(|x: &i32| *x);
    let mut acc = collector.create_accumulator();
    let _undos = accumulate_all(&collector, &mut acc, &[5, 1, 5, 3]);

    assert_eq!(collector.finish(&acc), BTreeSet::from([1, 3, 5]));
}

#[test]
fn test_to_sorted_set_by_comparator() {
    let collector = to_sorted_set_by(|x: &i32| *x, |a: &i32, b: &i32| b.cmp(a));
    let mut acc = collector.create_accumulator();
    let mut undos = accumulate_all(&collector, &mut acc, &[5, 1, 5, 3]);

    assert_eq!(collector.finish(&acc), vec![5, 3, 1]);

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc), vec![5, 3, 1]);
    collector.retract(&mut acc, undos.remove(1)).unwrap();
    assert_eq!(collector.finish(&acc), vec![3, 1]);
}
