use streamforge_test::Person;

use super::accumulate_all;
use crate::stream::collector::{
    compose, compose3, conditionally, count, max, min, sum, to_list, Collector, ConditionalUndo,
};

#[test]
fn test_conditionally_skips_rejected_tuples() {
    let collector = conditionally(|p: &Person| p.age >= 25, to_list(|p: &Person| p.name.clone()));
    let mut acc = collector.create_accumulator();

    let before = collector.finish(&acc);
    let skipped = collector.accumulate(&mut acc, &Person::new("Ann", 20));
    assert_eq!(skipped, ConditionalUndo::Skipped);
    assert_eq!(collector.finish(&acc), before);

    let kept = collector.accumulate(&mut acc, &Person::new("Beth", 25));
    assert!(matches!(kept, ConditionalUndo::Delegated(_)));
    assert_eq!(collector.finish(&acc), vec!["Beth".to_string()]);

    // Undoing the skipped tuple is a true no-op.
    collector.retract(&mut acc, skipped).unwrap();
    assert_eq!(collector.finish(&acc), vec!["Beth".to_string()]);

    collector.retract(&mut acc, kept).unwrap();
    assert!(collector.finish(&acc).is_empty());
}

#[test]
fn test_conditionally_over_composite() {
    let collector = conditionally(
        |x: &i32| *x % 2 == 0,
        compose(count(), sum(|x: &i32| *x), |n: usize, total: i32| (n, total)),
    );
    let mut acc = collector.create_accumulator();
    let undos = accumulate_all(&collector, &mut acc, &[1, 2, 3, 4]);
    assert_eq!(collector.finish(&acc), (2, 6));

    for undo in undos {
        collector.retract(&mut acc, undo).unwrap();
    }
    assert_eq!(collector.finish(&acc), (0, 0));
}

#[test]
fn test_compose3_range() {
    let collector = compose3(
        min(|x: &i32| *x),
        max(|x: &i32| *x),
        count(),
        |lo: Option<i32>, hi: Option<i32>, n: usize| (lo.zip(hi).map(|(lo, hi)| hi - lo), n),
    );
    let mut acc = collector.create_accumulator();
    assert_eq!(collector.finish(&acc), (None, 0));

    let mut undos = accumulate_all(&collector, &mut acc, &[3, 10, 7]);
    assert_eq!(collector.finish(&acc), (Some(7), 3));

    collector.retract(&mut acc, undos.remove(1)).unwrap();
    assert_eq!(collector.finish(&acc), (Some(4), 2));
}
