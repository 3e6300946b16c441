// Collection collectors: lists and sets of mapped values.
//
// Sets are backed by multiplicity trackers, so a value stays in the result
// until every tuple that produced it has been retracted.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use streamforge_core::{Result, StreamError};
use tracing::error;

use super::{Collector, ComparatorTracker, MultiplicityTracker, SortedMultiplicityTracker, ValueUndo};

// Creates a collector gathering mapped values into a list.
//
// Duplicates are kept. Retraction removes the first occurrence equal to
// the undone value, not necessarily the one that undo was issued for, so
// among equal values the list only guarantees how many remain.
//
// # Example
//
// ```
// use streamforge_scoring::stream::collector::{to_list, Collector};
//
// let collector = to_list(|s: &&str| s.to_string());
// let mut acc = collector.create_accumulator();
//
// let _a = collector.accumulate(&mut acc, &"x");
// let b = collector.accumulate(&mut acc, &"y");
// let _c = collector.accumulate(&mut acc, &"x");
// assert_eq!(collector.finish(&acc), vec!["x", "y", "x"]);
//
// collector.retract(&mut acc, b).unwrap();
// assert_eq!(collector.finish(&acc), vec!["x", "x"]);
// ```
pub fn to_list<A, V, F>(mapper: F) -> ToListCollector<A, V, F>
where
    V: PartialEq + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    ToListCollector {
        mapper,
        _phantom: PhantomData,
    }
}

/// Creates a collector gathering distinct mapped values into a `HashSet`.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use streamforge_scoring::stream::collector::{to_set, Collector};
///
/// let collector = to_set(|x: &i32| x.abs());
/// let mut acc = collector.create_accumulator();
/// let _a = collector.accumulate(&mut acc, &-2);
/// let b = collector.accumulate(&mut acc, &2);
/// collector.retract(&mut acc, b).unwrap();
///
/// assert_eq!(collector.finish(&acc), HashSet::from([2]));
/// ```
pub fn to_set<A, V, F>(mapper: F) -> ToSetCollector<A, V, F>
where
    V: Eq + Hash + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    ToSetCollector {
        mapper,
        _phantom: PhantomData,
    }
}

/// Creates a collector gathering distinct mapped values into a `BTreeSet`.
pub fn to_sorted_set<A, V, F>(mapper: F) -> ToSortedSetCollector<A, V, F>
where
    V: Ord + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    ToSortedSetCollector {
        mapper,
        _phantom: PhantomData,
    }
}

/// Creates a collector gathering mapped values into a list sorted by
/// `comparator`, one entry per distinct value.
pub fn to_sorted_set_by<A, V, F, C>(mapper: F, comparator: C) -> ToSortedSetByCollector<A, V, F, C>
where
    V: Clone,
    F: Fn(&A) -> V + Send + Sync,
    C: Fn(&V, &V) -> Ordering + Send + Sync,
{
    ToSortedSetByCollector {
        mapper,
        comparator: Arc::new(comparator),
        _phantom: PhantomData,
    }
}

// ============================================================================
// to_list
// ============================================================================

// Created by the [`to_list()`] function.
pub struct ToListCollector<A, V, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> V>,
}

impl<A, V, F> Collector<A> for ToListCollector<A, V, F>
where
    V: PartialEq + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    type Accumulator = Vec<V>;
    type Undo = ValueUndo<V>;
    type Result = Vec<V>;

    fn create_accumulator(&self) -> Vec<V> {
        Vec::new()
    }

    fn accumulate(&self, acc: &mut Vec<V>, tuple: &A) -> Self::Undo {
        let value = (self.mapper)(tuple);
        acc.push(value.clone());
        ValueUndo::new(value)
    }

    fn retract(&self, acc: &mut Vec<V>, undo: Self::Undo) -> Result<()> {
        let value = undo.into_value();
        match acc.iter().position(|v| *v == value) {
            Some(pos) => {
                acc.remove(pos);
                Ok(())
            }
            None => {
                let err = StreamError::underflow::<V>();
                error!("{err}");
                Err(err)
            }
        }
    }

    fn finish(&self, acc: &Vec<V>) -> Vec<V> {
        acc.clone()
    }
}

// ============================================================================
// Sets
// ============================================================================

// Created by the [`to_set()`] function.
pub struct ToSetCollector<A, V, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> V>,
}

impl<A, V, F> Collector<A> for ToSetCollector<A, V, F>
where
    V: Eq + Hash + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    type Accumulator = MultiplicityTracker<V>;
    type Undo = ValueUndo<V>;
    type Result = HashSet<V>;

    fn create_accumulator(&self) -> Self::Accumulator {
        MultiplicityTracker::new()
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        let value = (self.mapper)(tuple);
        acc.add(value.clone());
        ValueUndo::new(value)
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        acc.remove(undo.value()).map(|_| ())
    }

    fn finish(&self, acc: &Self::Accumulator) -> HashSet<V> {
        acc.keys().cloned().collect()
    }
}

// Created by the [`to_sorted_set()`] function.
pub struct ToSortedSetCollector<A, V, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> V>,
}

impl<A, V, F> Collector<A> for ToSortedSetCollector<A, V, F>
where
    V: Ord + Clone,
    F: Fn(&A) -> V + Send + Sync,
{
    type Accumulator = SortedMultiplicityTracker<V>;
    type Undo = ValueUndo<V>;
    type Result = BTreeSet<V>;

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

    fn finish(&self, acc: &Self::Accumulator) -> BTreeSet<V> {
        acc.keys().cloned().collect()
    }
}

// Created by the [`to_sorted_set_by()`] function.
pub struct ToSortedSetByCollector<A, V, F, C> {
    mapper: F,
    comparator: Arc<C>,
    _phantom: PhantomData<fn(&A) -> V>,
}

impl<A, V, F, C> Collector<A> for ToSortedSetByCollector<A, V, F, C>
where
    V: Clone,
    F: Fn(&A) -> V + Send + Sync,
    C: Fn(&V, &V) -> Ordering + Send + Sync,
{
    type Accumulator = ComparatorTracker<V, C>;
    type Undo = ValueUndo<V>;
    type Result = Vec<V>;

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

    fn finish(&self, acc: &Self::Accumulator) -> Vec<V> {
        acc.keys().cloned().collect()
    }
}
