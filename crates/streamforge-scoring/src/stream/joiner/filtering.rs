//! Opaque predicate joiner.
//!
//! A filter sees the whole left tuple and the right fact, so it can express
//! conditions no key extractor can, such as comparing facts across tuple
//! slots. The price is that no index can answer it: a join whose leading
//! condition is a filter scans, and inside a composite the filter only runs
//! on candidates that survived every indexable condition.

use super::{Joiner, JoinerType};

/// Creates a joiner from a predicate over the left tuple and the right fact.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{equal_bi, filtering, Joiner, JoinerType};
///
/// struct Shift { id: u32, employee: u32 }
///
/// // Extend a pair of shifts with a third shift of the same employee,
/// // distinct from both.
/// let third = equal_bi(|t: &(u32, u32, u32)| t.2, |s: &Shift| s.employee)
///     .and(filtering(|t: &(u32, u32, u32), s: &Shift| s.id != t.0 && s.id != t.1));
///
/// assert!(third.matches(&(1, 2, 7), &Shift { id: 3, employee: 7 }));
/// assert!(!third.matches(&(1, 2, 7), &Shift { id: 2, employee: 7 }));
/// assert_eq!(
///     Joiner::<(u32, u32, u32), Shift>::joiner_types(&third),
///     vec![JoinerType::Equal, JoinerType::Filtering]
/// );
/// ```
pub fn filtering<L, R, F>(predicate: F) -> FilteringJoiner<F>
where
    F: Fn(&L, &R) -> bool + Send + Sync,
{
    FilteringJoiner { predicate }
}

/// A joiner backed by an arbitrary predicate.
///
/// Created by [`filtering()`].
pub struct FilteringJoiner<F> {
    predicate: F,
}

impl<L, R, F> Joiner<L, R> for FilteringJoiner<F>
where
    F: Fn(&L, &R) -> bool + Send + Sync,
{
    #[inline]
    fn matches(&self, left: &L, right: &R) -> bool {
        (self.predicate)(left, right)
    }

    // Nothing indexable to check.
    #[inline]
    fn matches_indexed(&self, _left: &L, _right: &R) -> bool {
        true
    }

    #[inline]
    fn matches_filter(&self, left: &L, right: &R) -> bool {
        (self.predicate)(left, right)
    }

    fn joiner_types(&self) -> Vec<JoinerType> {
        vec![JoinerType::Filtering]
    }
}
