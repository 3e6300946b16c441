// Joiner functions for constraint stream joins.
//
// Joiners decide which left tuples and right facts combine into a wider
// tuple. Besides the match predicate, every joiner reports what kind of
// comparison it performs so a join node can pick a hash index, a sorted
// range index, or a full scan.
//
// # Self-joins
//
// Use [`equal()`] with a single extractor for self-joins:
//
// ```
// use streamforge_scoring::stream::joiner::{Joiner, equal};
//
// #[derive(Clone)]
// struct Shift { employee_id: usize, start: i64, end: i64 }
//
// let same_employee = equal(|s: &Shift| s.employee_id);
// assert!(same_employee.matches(
//     &Shift { employee_id: 1, start: 0, end: 8 },
//     &Shift { employee_id: 1, start: 8, end: 16 }
// ));
// ```
//
// # Cross-joins
//
// Use [`equal_bi()`] for cross-joins between different types:
//
// ```
// use streamforge_scoring::stream::joiner::{Joiner, equal_bi};
//
// struct Employee { id: usize }
// struct Shift { employee_id: Option<usize> }
//
// let by_id = equal_bi(
//     |shift: &Shift| shift.employee_id,
//     |emp: &Employee| Some(emp.id)
// );
// ```

mod comparison;
mod equal;
mod filtering;
mod joiner_type;
mod overlapping;

#[cfg(test)]
mod tests;

pub use comparison::{
    greater_than, greater_than_or_equal, less_than, less_than_or_equal, GreaterThanJoiner,
    GreaterThanOrEqualJoiner, LessThanJoiner, LessThanOrEqualJoiner,
};
pub use equal::{equal, equal_bi, identity, EqualJoiner};
pub use filtering::{filtering, FilteringJoiner};
pub use joiner_type::JoinerType;
pub use overlapping::{during, overlapping, DuringJoiner, OverlappingJoiner};

use crate::stream::index::{JoinIndex, ScanIndex};

/// A joiner defines the matching condition between a left tuple and a right fact.
///
/// `L` is the left side (a fact, or a tuple of any arity) and `R` is the
/// candidate fact on the right.
///
/// Custom joiners only need [`matches`](Joiner::matches); they are treated
/// as opaque filters. Built-in equality and comparison joiners override the
/// split methods so that composites evaluate every indexable condition
/// before any filter.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{Joiner, JoinerType, equal};
///
/// let joiner = equal(|x: &i32| *x % 10);
/// assert!(joiner.matches(&15, &25));  // Both end in 5
/// assert!(!joiner.matches(&15, &26)); // 5 != 6
/// assert_eq!(Joiner::<i32, i32>::joiner_types(&joiner), vec![JoinerType::Equal]);
/// ```
pub trait Joiner<L, R>: Send + Sync {
    /// Returns true if the left tuple and the right fact should be joined.
    fn matches(&self, left: &L, right: &R) -> bool;

    /// Evaluates only the indexable conditions of this joiner.
    #[inline]
    fn matches_indexed(&self, _left: &L, _right: &R) -> bool {
        true
    }

    /// Evaluates only the opaque filter conditions of this joiner.
    #[inline]
    fn matches_filter(&self, left: &L, right: &R) -> bool {
        self.matches(left, right)
    }

    /// Comparison type of each component, in evaluation order.
    ///
    /// This is planning-time introspection, not meant for hot paths.
    fn joiner_types(&self) -> Vec<JoinerType> {
        vec![JoinerType::Filtering]
    }

    /// Combines this joiner with another using AND semantics.
    ///
    /// The resulting joiner matches only if both joiners match. It stays
    /// indexable on `self` and checks `other` on the candidates the index
    /// returns.
    ///
    /// # Example
    ///
    /// ```
    /// use streamforge_scoring::stream::joiner::{Joiner, equal};
    ///
    /// #[derive(Clone)]
    /// struct Item { category: u32, priority: u32 }
    ///
    /// let same_category = equal(|i: &Item| i.category);
    /// let same_priority = equal(|i: &Item| i.priority);
    ///
    /// let combined = same_category.and(same_priority);
    ///
    /// let a = Item { category: 1, priority: 5 };
    /// let b = Item { category: 1, priority: 5 };
    /// let c = Item { category: 1, priority: 3 };
    ///
    /// assert!(combined.matches(&a, &b));
    /// assert!(!combined.matches(&a, &c));
    /// ```
    fn and<J>(self, other: J) -> AndJoiner<Self, J>
    where
        Self: Sized,
        J: Joiner<L, R>,
    {
        merge::<L, R, Self, J>(self, other)
    }
}

/// A joiner whose leading condition can drive an index lookup.
///
/// The join node stores left tuples under [`left_key`](IndexedJoiner::left_key)
/// and right facts under [`right_key`](IndexedJoiner::right_key) in an index of
/// type [`Index`](IndexedJoiner::Index), then re-checks every candidate with
/// [`Joiner::matches`].
///
/// Mapped keys must not change while a tuple is indexed under them.
pub trait IndexedJoiner<L, R>: Joiner<L, R> {
    /// Key extracted from both sides.
    type Key: Clone;

    /// Index able to answer lookups for [`IndexedJoiner::index_type`].
    type Index: JoinIndex<Self::Key>;

    /// The comparison the index answers, read as `left_key OP right_key`.
    fn index_type(&self) -> JoinerType;

    /// Extracts the index key from the left tuple.
    fn left_key(&self, left: &L) -> Self::Key;

    /// Extracts the index key from the right fact.
    fn right_key(&self, right: &R) -> Self::Key;
}

/// Merges two joiners into a composite.
///
/// The composite is indexable on `first` when `first` is, and evaluates
/// indexable conditions of both components before any opaque filter.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{
///     filtering, less_than, merge, Joiner, JoinerType,
/// };
///
/// let joiner = merge(
///     filtering(|a: &i64, b: &i64| (a + b) % 2 == 0),
///     less_than(|a: &i64| *a, |b: &i64| *b),
/// );
///
/// assert_eq!(
///     Joiner::<i64, i64>::joiner_types(&joiner),
///     vec![JoinerType::LessThan, JoinerType::Filtering]
/// );
/// assert!(joiner.matches(&1, &3));
/// assert!(!joiner.matches(&1, &4));
/// assert!(!joiner.matches(&3, &1));
/// ```
pub fn merge<L, R, J1, J2>(first: J1, second: J2) -> AndJoiner<J1, J2>
where
    J1: Joiner<L, R>,
    J2: Joiner<L, R>,
{
    AndJoiner { first, second }
}

/// A joiner that combines two joiners with AND semantics.
///
/// Created by [`merge()`] or by calling `joiner.and(other)`.
pub struct AndJoiner<J1, J2> {
    first: J1,
    second: J2,
}

impl<J1, J2> AndJoiner<J1, J2> {
    /// Returns the leading component, which drives indexing.
    pub fn first(&self) -> &J1 {
        &self.first
    }

    /// Returns the trailing component.
    pub fn second(&self) -> &J2 {
        &self.second
    }
}

impl<L, R, J1, J2> Joiner<L, R> for AndJoiner<J1, J2>
where
    J1: Joiner<L, R>,
    J2: Joiner<L, R>,
{
    #[inline]
    fn matches(&self, left: &L, right: &R) -> bool {
        self.matches_indexed(left, right) && self.matches_filter(left, right)
    }

    #[inline]
    fn matches_indexed(&self, left: &L, right: &R) -> bool {
        self.first.matches_indexed(left, right) && self.second.matches_indexed(left, right)
    }

    #[inline]
    fn matches_filter(&self, left: &L, right: &R) -> bool {
        self.first.matches_filter(left, right) && self.second.matches_filter(left, right)
    }

    fn joiner_types(&self) -> Vec<JoinerType> {
        let mut types = self.first.joiner_types();
        types.extend(self.second.joiner_types());
        // Stable: keeps the merge order within each class
        types.sort_by_key(|t| !t.is_indexable());
        types
    }
}

impl<L, R, J1, J2> IndexedJoiner<L, R> for AndJoiner<J1, J2>
where
    J1: IndexedJoiner<L, R>,
    J2: Joiner<L, R>,
{
    type Key = J1::Key;
    type Index = J1::Index;

    #[inline]
    fn index_type(&self) -> JoinerType {
        self.first.index_type()
    }

    #[inline]
    fn left_key(&self, left: &L) -> Self::Key {
        self.first.left_key(left)
    }

    #[inline]
    fn right_key(&self, right: &R) -> Self::Key {
        self.first.right_key(right)
    }
}

/// Adapts any joiner into an [`IndexedJoiner`] that scans all candidates.
///
/// This is how composites made only of opaque filters, or composites that
/// start with a filter, are joined: correctness over performance.
pub struct Unindexed<J> {
    inner: J,
}

impl<J> Unindexed<J> {
    pub fn new(inner: J) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> J {
        self.inner
    }
}

impl<L, R, J> Joiner<L, R> for Unindexed<J>
where
    J: Joiner<L, R>,
{
    #[inline]
    fn matches(&self, left: &L, right: &R) -> bool {
        self.inner.matches(left, right)
    }

    #[inline]
    fn matches_indexed(&self, left: &L, right: &R) -> bool {
        self.inner.matches_indexed(left, right)
    }

    #[inline]
    fn matches_filter(&self, left: &L, right: &R) -> bool {
        self.inner.matches_filter(left, right)
    }

    fn joiner_types(&self) -> Vec<JoinerType> {
        self.inner.joiner_types()
    }
}

impl<L, R, J> IndexedJoiner<L, R> for Unindexed<J>
where
    J: Joiner<L, R>,
{
    type Key = ();
    type Index = ScanIndex;

    #[inline]
    fn index_type(&self) -> JoinerType {
        JoinerType::Filtering
    }

    #[inline]
    fn left_key(&self, _left: &L) -> Self::Key {}

    #[inline]
    fn right_key(&self, _right: &R) -> Self::Key {}
}
