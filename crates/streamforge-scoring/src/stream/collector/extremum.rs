//! Min and max collectors.
//!
//! Both keep every present value in an ordered tracker, so retracting the
//! current extremum exposes the next one without a rescan. When several
//! tuples map to the extremal value, which of them is reported is not
//! specified.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use streamforge_core::Result;

use super::{Collector, ComparatorTracker, SortedMultiplicityTracker, ValueUndo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Min,
    Max,
}

/// Creates a collector returning the least mapped value, by `Ord`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{min, Collector};
///
/// let collector = min(|x: &i32| *x);
/// let mut acc = collector.create_accumulator();
/// assert_eq!(collector.finish(&acc), None);
///
/// let low = collector.accumulate(&mut acc, &3);
/// let _high = collector.accumulate(&mut acc, &8);
/// assert_eq!(collector.finish(&acc), Some(3));
///
/// collector.retract(&mut acc, low).unwrap();
/// assert_eq!(collector.finish(&acc), Some(8));
/// ```
pub fn min<A, K, F>(mapper: F) -> ExtremumCollector<A, K, F>
where
    K: Ord + Clone,
    F: Fn(&A) -> K + Send + Sync,
{
    ExtremumCollector {
        mapper,
        extremum: Extremum::Min,
        _phantom: PhantomData,
    }
}

/// Creates a collector returning the greatest mapped value, by `Ord`.
pub fn max<A, K, F>(mapper: F) -> ExtremumCollector<A, K, F>
where
    K: Ord + Clone,
    F: Fn(&A) -> K + Send + Sync,
{
    ExtremumCollector {
        mapper,
        extremum: Extremum::Max,
        _phantom: PhantomData,
    }
}

/// Creates a collector returning the least mapped value by `comparator`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{min_by, Collector};
///
/// // Shortest name
/// let collector = min_by(
///     |name: &&str| name.to_string(),
///     |a: &String, b: &String| a.len().cmp(&b.len()),
/// );
/// let mut acc = collector.create_accumulator();
/// let _a = collector.accumulate(&mut acc, &"Beth");
/// let _b = collector.accumulate(&mut acc, &"Ann");
/// assert_eq!(collector.finish(&acc).as_deref(), Some("Ann"));
/// ```
pub fn min_by<A, K, F, C>(mapper: F, comparator: C) -> ExtremumByCollector<A, K, F, C>
where
    K: Clone,
    F: Fn(&A) -> K + Send + Sync,
    C: Fn(&K, &K) -> Ordering + Send + Sync,
{
    ExtremumByCollector {
        mapper,
        comparator: Arc::new(comparator),
        extremum: Extremum::Min,
        _phantom: PhantomData,
    }
}

/// Creates a collector returning the greatest mapped value by `comparator`.
pub fn max_by<A, K, F, C>(mapper: F, comparator: C) -> ExtremumByCollector<A, K, F, C>
where
    K: Clone,
    F: Fn(&A) -> K + Send + Sync,
    C: Fn(&K, &K) -> Ordering + Send + Sync,
{
    ExtremumByCollector {
        mapper,
        comparator: Arc::new(comparator),
        extremum: Extremum::Max,
        _phantom: PhantomData,
    }
}

/// A min or max collector ordered by `Ord`.
///
/// Created by the [`min()`] and [`max()`] functions.
pub struct ExtremumCollector<A, K, F> {
    mapper: F,
    extremum: Extremum,
    _phantom: PhantomData<fn(&A) -> K>,
}

impl<A, K, F> Collector<A> for ExtremumCollector<A, K, F>
where
    K: Ord + Clone,
    F: Fn(&A) -> K + Send + Sync,
{
    type Accumulator = SortedMultiplicityTracker<K>;
    type Undo = ValueUndo<K>;
    type Result = Option<K>;

    fn create_accumulator(&self) -> Self::Accumulator {
        SortedMultiplicityTracker::new()
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        let value = (self.mapper)(tuple);
        acc.add(value.clone());
        ValueUndo::new(value)
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        acc.remove(undo.value()).map(|_| ())
    }

    fn finish(&self, acc: &Self::Accumulator) -> Option<K> {
        match self.extremum {
            Extremum::Min => acc.first().cloned(),
            Extremum::Max => acc.last().cloned(),
        }
    }
}

/// A min or max collector ordered by a comparator.
///
/// Created by the [`min_by()`] and [`max_by()`] functions.
pub struct ExtremumByCollector<A, K, F, C> {
    mapper: F,
    comparator: Arc<C>,
    extremum: Extremum,
    _phantom: PhantomData<fn(&A) -> K>,
}

impl<A, K, F, C> Collector<A> for ExtremumByCollector<A, K, F, C>
where
    K: Clone,
    F: Fn(&A) -> K + Send + Sync,
    C: Fn(&K, &K) -> Ordering + Send + Sync,
{
    type Accumulator = ComparatorTracker<K, C>;
    type Undo = ValueUndo<K>;
    type Result = Option<K>;

    fn create_accumulator(&self) -> Self::Accumulator {
        ComparatorTracker::new(Arc::clone(&self.comparator))
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        let value = (self.mapper)(tuple);
        acc.add(value.clone());
        ValueUndo::new(value)
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        acc.remove(undo.into_value()).map(|_| ())
    }

    fn finish(&self, acc: &Self::Accumulator) -> Option<K> {
        match self.extremum {
            Extremum::Min => acc.first().cloned(),
            Extremum::Max => acc.last().cloned(),
        }
    }
}
