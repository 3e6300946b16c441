// Tests for joiner module.

use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Interval {
    start: i64,
    end: i64,
}

fn interval(start: i64, end: i64) -> Interval {
    Interval { start, end }
}

// ============================================================================
// Equal joiner tests
// ============================================================================

#[test]
fn test_equal_matches_on_mapped_value() {
    let joiner = equal(|x: &i32| *x % 10);
    assert!(joiner.matches(&15, &25));
    assert!(!joiner.matches(&15, &26));
    assert!(joiner.matches_indexed(&15, &25));
    assert!(joiner.matches_filter(&15, &26));
}

#[test]
fn test_equal_bi_across_types() {
    let joiner = equal_bi(|name: &String| name.len(), |n: &usize| *n);
    assert!(joiner.matches(&"Ann".to_string(), &3));
    assert!(!joiner.matches(&"Beth".to_string(), &3));
    assert_eq!(
        Joiner::<String, usize>::joiner_types(&joiner),
        vec![JoinerType::Equal]
    );
}

#[test]
fn test_identity_compares_whole_fact() {
    let joiner = identity::<String>();
    assert!(joiner.matches(&"Ann".to_string(), &"Ann".to_string()));
    assert!(!joiner.matches(&"Ann".to_string(), &"Eric".to_string()));
    assert_eq!(joiner.left_key(&"Ann".to_string()), "Ann");
}

#[test]
fn test_equal_key_extraction() {
    let joiner = equal_bi(|a: &(i32, i32)| a.0, |b: &i32| *b);
    assert_eq!(joiner.index_type(), JoinerType::Equal);
    assert_eq!(joiner.left_key(&(4, 9)), 4);
    assert_eq!(joiner.right_key(&7), 7);
}

// ============================================================================
// Comparison joiner tests
// ============================================================================

#[test]
fn test_comparison_boundaries() {
    let lt = less_than(|a: &i32| *a, |b: &i32| *b);
    let le = less_than_or_equal(|a: &i32| *a, |b: &i32| *b);
    let gt = greater_than(|a: &i32| *a, |b: &i32| *b);
    let ge = greater_than_or_equal(|a: &i32| *a, |b: &i32| *b);

    assert!(lt.matches(&1, &2) && !lt.matches(&2, &2) && !lt.matches(&3, &2));
    assert!(le.matches(&1, &2) && le.matches(&2, &2) && !le.matches(&3, &2));
    assert!(!gt.matches(&1, &2) && !gt.matches(&2, &2) && gt.matches(&3, &2));
    assert!(!ge.matches(&1, &2) && ge.matches(&2, &2) && ge.matches(&3, &2));
}

#[test]
fn test_comparison_reports_index_type() {
    let lt = less_than(|a: &i32| *a, |b: &i32| *b);
    let ge = greater_than_or_equal(|a: &i32| *a, |b: &i32| *b);

    assert_eq!(IndexedJoiner::<i32, i32>::index_type(&lt), JoinerType::LessThan);
    assert_eq!(
        IndexedJoiner::<i32, i32>::index_type(&ge),
        JoinerType::GreaterThanOrEqual
    );
}

#[test]
fn test_comparison_uses_ord_not_identity() {
    // Two distinct strings with the same content compare equal.
    let joiner = less_than_or_equal(|a: &String| a.clone(), |b: &String| b.clone());
    assert!(joiner.matches(&"b".to_string(), &"b".to_string()));
    assert!(!joiner.matches(&"c".to_string(), &"b".to_string()));
}

// ============================================================================
// Interval joiner tests
// ============================================================================

#[test]
fn test_overlapping_half_open_intervals() {
    let joiner = overlapping(
        |a: &Interval| a.start,
        |a: &Interval| a.end,
        |b: &Interval| b.start,
        |b: &Interval| b.end,
    );

    assert!(joiner.matches(&interval(1, 5), &interval(4, 10)));
    assert!(!joiner.matches(&interval(1, 5), &interval(5, 10)));
    assert!(joiner.matches(&interval(4, 10), &interval(1, 5)));
    assert!(joiner.matches(&interval(0, 10), &interval(2, 3)));
    assert!(!joiner.matches(&interval(6, 8), &interval(1, 5)));
}

#[test]
fn test_overlapping_is_two_comparisons() {
    let joiner = overlapping(
        |a: &Interval| a.start,
        |a: &Interval| a.end,
        |b: &Interval| b.start,
        |b: &Interval| b.end,
    );

    assert_eq!(
        Joiner::<Interval, Interval>::joiner_types(&joiner),
        vec![JoinerType::LessThan, JoinerType::GreaterThan]
    );
    assert_eq!(
        IndexedJoiner::<Interval, Interval>::index_type(&joiner),
        JoinerType::LessThan
    );
    // Indexed on left start against right end.
    assert_eq!(joiner.left_key(&interval(1, 5)), 1);
    assert_eq!(joiner.right_key(&interval(4, 10)), 10);
}

#[test]
fn test_during_containment() {
    let joiner = during(
        |a: &Interval| a.start,
        |a: &Interval| a.end,
        |b: &Interval| b.start,
        |b: &Interval| b.end,
    );

    assert!(joiner.matches(&interval(0, 10), &interval(2, 8)));
    assert!(joiner.matches(&interval(0, 10), &interval(0, 10)));
    assert!(!joiner.matches(&interval(2, 8), &interval(0, 10)));
    assert!(!joiner.matches(&interval(0, 10), &interval(5, 11)));
    assert_eq!(
        Joiner::<Interval, Interval>::joiner_types(&joiner),
        vec![JoinerType::LessThanOrEqual, JoinerType::GreaterThanOrEqual]
    );
}

#[test]
fn test_filtering_sees_whole_left_tuple() {
    // Third slot must differ from both earlier slots.
    let joiner = filtering(|t: &(u32, u32), x: &u32| *x != t.0 && *x != t.1);

    assert!(joiner.matches(&(1, 2), &3));
    assert!(!joiner.matches(&(1, 2), &2));
    assert!(joiner.matches_indexed(&(1, 2), &2));
    assert!(!joiner.matches_filter(&(1, 2), &2));
    assert_eq!(
        Joiner::<(u32, u32), u32>::joiner_types(&joiner),
        vec![JoinerType::Filtering]
    );
}

// ============================================================================
// Composite joiner tests
// ============================================================================

#[test]
fn test_composite_orders_indexable_before_filters() {
    let joiner = merge(
        filtering(|a: &i32, b: &i32| a + b < 100),
        merge(
            less_than(|a: &i32| *a, |b: &i32| *b),
            filtering(|a: &i32, _b: &i32| *a >= 0),
        ),
    );
    let joiner = joiner.and(equal(|x: &i32| *x % 2));

    assert_eq!(
        Joiner::<i32, i32>::joiner_types(&joiner),
        vec![
            JoinerType::LessThan,
            JoinerType::Equal,
            JoinerType::Filtering,
            JoinerType::Filtering,
        ]
    );
}

#[test]
fn test_composite_skips_filter_when_indexable_fails() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = AtomicUsize::new(0);
    let joiner = merge(
        filtering(|_a: &i32, _b: &i32| {
            calls.fetch_add(1, Ordering::Relaxed);
            true
        }),
        equal(|x: &i32| *x),
    );

    assert!(!joiner.matches(&1, &2));
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    assert!(joiner.matches(&2, &2));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn test_composite_is_logical_and() {
    let joiner = equal(|x: &(i32, i32)| x.0).and(less_than(|a: &(i32, i32)| a.1, |b: &(i32, i32)| b.1));

    assert!(joiner.matches(&(1, 1), &(1, 2)));
    assert!(!joiner.matches(&(1, 2), &(1, 2)));
    assert!(!joiner.matches(&(1, 1), &(2, 2)));
}

#[test]
fn test_composite_indexes_on_first_component() {
    let joiner = merge(
        equal_bi(|a: &(u32, i64)| a.0, |b: &(u32, i64)| b.0),
        greater_than(|a: &(u32, i64)| a.1, |b: &(u32, i64)| b.1),
    );

    assert_eq!(joiner.index_type(), JoinerType::Equal);
    assert_eq!(joiner.left_key(&(7, 1)), 7);
    assert_eq!(joiner.right_key(&(8, 1)), 8);
}

// ============================================================================
// Unindexed adapter tests
// ============================================================================

#[test]
fn test_unindexed_wraps_filter() {
    let joiner = Unindexed::new(filtering(|a: &i32, b: &i32| a > b));

    assert_eq!(IndexedJoiner::<i32, i32>::index_type(&joiner), JoinerType::Filtering);
    assert!(joiner.matches(&3, &2));
    assert!(!joiner.matches(&2, &3));
    assert_eq!(
        Joiner::<i32, i32>::joiner_types(&joiner),
        vec![JoinerType::Filtering]
    );
}

// ============================================================================
// JoinerType tests
// ============================================================================

#[test]
fn test_joiner_type_flip_and_match() {
    use std::cmp::Ordering;

    assert_eq!(JoinerType::LessThan.flip(), JoinerType::GreaterThan);
    assert_eq!(JoinerType::GreaterThanOrEqual.flip(), JoinerType::LessThanOrEqual);
    assert_eq!(JoinerType::Equal.flip(), JoinerType::Equal);

    assert!(JoinerType::LessThanOrEqual.matches(Ordering::Equal));
    assert!(!JoinerType::LessThan.matches(Ordering::Equal));
    assert!(JoinerType::Filtering.matches(Ordering::Greater));
    assert!(JoinerType::LessThan.is_range());
    assert!(!JoinerType::Equal.is_range());
    assert!(!JoinerType::Filtering.is_indexable());
}
