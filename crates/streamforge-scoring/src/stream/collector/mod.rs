// Collectors for grouping and aggregating tuples.
//
// A collector is stateless configuration (mappers, comparators). The state
// for one group lives in an accumulator the collector creates. Every
// `accumulate` returns an undo token; handing that token back to `retract`
// reverses exactly that one insertion, in any order relative to others.
//
// Mapper functions are stored once in the collector, never cloned into
// accumulators.

mod collection;
mod compose;
mod conditional;
mod count;
mod extremum;
mod map;
mod sum;
mod tracker;

#[cfg(test)]
mod tests;

pub use collection::{
    to_list, to_set, to_sorted_set, to_sorted_set_by, ToListCollector, ToSetCollector,
    ToSortedSetByCollector, ToSortedSetCollector,
};
pub use compose::{compose, compose3, Compose3Collector, Compose3Undo, ComposeCollector, ComposeUndo};
pub use conditional::{conditionally, ConditionalCollector, ConditionalUndo};
pub use count::{
    count, count_distinct, count_long, CountCollector, CountDistinctCollector, CountLongCollector,
    CountUndo,
};
pub use extremum::{max, max_by, min, min_by, ExtremumByCollector, ExtremumCollector};
pub use map::{
    to_map, to_map_merged, to_map_with, to_sorted_map, to_sorted_map_merged, to_sorted_map_with,
    EntryUndo, InsertionOrdered, MergedValues, ToMapCollector, ToMapMergedCollector,
    ToSortedMapCollector, ToSortedMapMergedCollector,
};
pub use sum::{average, sum, sum_with, AverageCollector, SumCollector};
pub use tracker::{
    ComparatorTracker, LinkedMultiplicityTracker, MultiplicityTracker, SortedMultiplicityTracker,
};

use streamforge_core::Result;

/// Incremental aggregation over a changing set of tuples.
///
/// Lifecycle per group: [`create_accumulator`](Collector::create_accumulator)
/// once, then any interleaving of [`accumulate`](Collector::accumulate) and
/// [`retract`](Collector::retract), with [`finish`](Collector::finish)
/// callable at any point. After every accumulated tuple has been retracted,
/// `finish` returns the same result as on a fresh accumulator.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{count, Collector};
///
/// let collector = count::<(i32,)>();
/// let mut acc = collector.create_accumulator();
///
/// let one = collector.accumulate(&mut acc, &(1,));
/// let two = collector.accumulate(&mut acc, &(2,));
/// assert_eq!(collector.finish(&acc), 2);
///
/// collector.retract(&mut acc, one).unwrap();
/// collector.retract(&mut acc, two).unwrap();
/// assert_eq!(collector.finish(&acc), 0);
/// ```
pub trait Collector<T> {
    /// Mutable per-group state.
    type Accumulator;

    /// Reverses one `accumulate` call.
    type Undo;

    /// Aggregate value produced from the accumulator.
    type Result;

    /// Creates an empty accumulator.
    fn create_accumulator(&self) -> Self::Accumulator;

    /// Adds `tuple` to `acc` and returns the token that reverses it.
    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &T) -> Self::Undo;

    /// Reverses the insertion `undo` was returned for.
    ///
    /// Fails with [`StreamError::Underflow`](streamforge_core::StreamError::Underflow)
    /// if `acc` does not hold what `undo` removes, which means the token
    /// belongs to another accumulator.
    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()>;

    /// Computes the current aggregate. Does not modify `acc`.
    fn finish(&self, acc: &Self::Accumulator) -> Self::Result;
}

/// Undo token carrying the mapped value to remove again.
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug, PartialEq, Eq)]
pub struct ValueUndo<V> {
    value: V,
}

impl<V> ValueUndo<V> {
    pub(crate) fn new(value: V) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}
