//! Interval joiners built from two comparison joiners.
//!
//! Neither is a new primitive: each one merges two inequality joiners over
//! the same pair of mapped properties, so the composite stays indexable on
//! its first comparison.

use super::{
    greater_than, greater_than_or_equal, less_than, less_than_or_equal, merge, AndJoiner,
    GreaterThanJoiner, GreaterThanOrEqualJoiner, LessThanJoiner, LessThanOrEqualJoiner,
};

/// Joiner produced by [`overlapping()`].
pub type OverlappingJoiner<Fsa, Fea, Fsb, Feb, T> =
    AndJoiner<LessThanJoiner<Fsa, Feb, T>, GreaterThanJoiner<Fea, Fsb, T>>;

/// Joiner produced by [`during()`].
pub type DuringJoiner<Fsa, Fea, Fsb, Feb, T> =
    AndJoiner<LessThanOrEqualJoiner<Fsa, Fsb, T>, GreaterThanOrEqualJoiner<Fea, Feb, T>>;

/// Creates a joiner that matches when two intervals overlap.
///
/// Two half-open intervals [start_a, end_a) and [start_b, end_b) overlap iff
/// `start_a < end_b` and `end_a > start_b`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{Joiner, overlapping};
///
/// #[derive(Clone)]
/// struct Shift { start: i64, end: i64 }
///
/// let overlap = overlapping(
///     |s: &Shift| s.start,
///     |s: &Shift| s.end,
///     |s: &Shift| s.start,
///     |s: &Shift| s.end
/// );
///
/// // [0, 10) and [5, 15) overlap at [5, 10)
/// assert!(overlap.matches(
///     &Shift { start: 0, end: 10 },
///     &Shift { start: 5, end: 15 }
/// ));
///
/// // [0, 10) and [10, 20) touch but don't overlap
/// assert!(!overlap.matches(
///     &Shift { start: 0, end: 10 },
///     &Shift { start: 10, end: 20 }
/// ));
/// ```
pub fn overlapping<A, B, T, Fsa, Fea, Fsb, Feb>(
    start_a: Fsa,
    end_a: Fea,
    start_b: Fsb,
    end_b: Feb,
) -> OverlappingJoiner<Fsa, Fea, Fsb, Feb, T>
where
    T: Ord,
    Fsa: Fn(&A) -> T + Send + Sync,
    Fea: Fn(&A) -> T + Send + Sync,
    Fsb: Fn(&B) -> T + Send + Sync,
    Feb: Fn(&B) -> T + Send + Sync,
{
    merge::<A, B, _, _>(less_than(start_a, end_b), greater_than(end_a, start_b))
}

/// Creates a joiner that matches when the left interval contains the right one.
///
/// Matches iff `start_a <= start_b` and `end_a >= end_b`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{Joiner, during};
///
/// let contains = during(
///     |a: &(i32, i32)| a.0,
///     |a: &(i32, i32)| a.1,
///     |b: &(i32, i32)| b.0,
///     |b: &(i32, i32)| b.1,
/// );
///
/// assert!(contains.matches(&(0, 10), &(2, 8)));
/// assert!(contains.matches(&(0, 10), &(0, 10)));
/// assert!(!contains.matches(&(2, 8), &(0, 10)));
/// ```
pub fn during<A, B, T, Fsa, Fea, Fsb, Feb>(
    start_a: Fsa,
    end_a: Fea,
    start_b: Fsb,
    end_b: Feb,
) -> DuringJoiner<Fsa, Fea, Fsb, Feb, T>
where
    T: Ord,
    Fsa: Fn(&A) -> T + Send + Sync,
    Fea: Fn(&A) -> T + Send + Sync,
    Fsb: Fn(&B) -> T + Send + Sync,
    Feb: Fn(&B) -> T + Send + Sync,
{
    merge::<A, B, _, _>(
        less_than_or_equal(start_a, start_b),
        greater_than_or_equal(end_a, end_b),
    )
}
