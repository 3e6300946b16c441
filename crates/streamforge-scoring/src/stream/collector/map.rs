//! Map collectors.
//!
//! The multi-valued variants keep, per key, the present values in the order
//! they first became present and build the result's value set from them; the
//! set type is the caller's choice and defaults to an insertion-ordered
//! [`IndexSet`]. The merged variants keep the present values per key and
//! recompute one merged value whenever that set changes; the recomputation is
//! linear in the number of distinct values under the key. A key is dropped
//! from the result as soon as its last value is retracted.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};
use streamforge_core::{Result, StreamError};
use tracing::error;

use super::{Collector, LinkedMultiplicityTracker};

/// Undo token of the map collectors: the key and value to remove again.
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug, PartialEq, Eq)]
pub struct EntryUndo<K, V> {
    key: K,
    value: V,
}

impl<K, V> EntryUndo<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

fn missing_key<K>() -> StreamError {
    let err = StreamError::underflow::<K>();
    error!("{err}");
    err
}

/// Value set factory used by [`to_map()`] and [`to_sorted_map()`].
pub type InsertionOrdered<V> = fn() -> IndexSet<V>;

/// Creates a collector building a `HashMap` from each key to the set of
/// values mapped under it, in the order the values became present.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{to_map, Collector};
///
/// let collector = to_map(|p: &(u32, &str)| p.0, |p: &(u32, &str)| p.1);
/// let mut acc = collector.create_accumulator();
///
/// let ann = collector.accumulate(&mut acc, &(20, "Ann"));
/// let _eric = collector.accumulate(&mut acc, &(20, "Eric"));
/// let _beth = collector.accumulate(&mut acc, &(20, "Beth"));
/// collector.retract(&mut acc, ann).unwrap();
///
/// let result = collector.finish(&acc);
/// assert_eq!(result[&20].iter().copied().collect::<Vec<_>>(), vec!["Eric", "Beth"]);
/// ```
pub fn to_map<A, K, V, Fk, Fv>(
    key_mapper: Fk,
    value_mapper: Fv,
) -> ToMapCollector<A, K, V, Fk, Fv, InsertionOrdered<V>>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
{
    to_map_with(key_mapper, value_mapper, IndexSet::new as InsertionOrdered<V>)
}

/// Like [`to_map()`], with each value set created by `value_set`.
///
/// The set is filled with the present values in the order they became
/// present, so an ordered set type decides its own order.
///
/// # Example
///
/// ```
/// use std::collections::{BTreeSet, HashMap};
/// use streamforge_scoring::stream::collector::{to_map_with, Collector};
///
/// let collector = to_map_with(|p: &(u32, &str)| p.0, |p: &(u32, &str)| p.1, BTreeSet::new);
/// let mut acc = collector.create_accumulator();
///
/// let _eric = collector.accumulate(&mut acc, &(20, "Eric"));
/// let _ann = collector.accumulate(&mut acc, &(20, "Ann"));
///
/// assert_eq!(
///     collector.finish(&acc),
///     HashMap::from([(20, BTreeSet::from(["Ann", "Eric"]))])
/// );
/// ```
pub fn to_map_with<A, K, V, S, Fk, Fv, Fs>(
    key_mapper: Fk,
    value_mapper: Fv,
    value_set: Fs,
) -> ToMapCollector<A, K, V, Fk, Fv, Fs>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
    S: Extend<V>,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
    Fs: Fn() -> S + Send + Sync,
{
    ToMapCollector {
        key_mapper,
        value_mapper,
        value_set,
        _phantom: PhantomData,
    }
}

/// Creates a collector building a `BTreeMap` from each key to the set of
/// values mapped under it.
///
/// Only the keys are sorted; each value set keeps the order its values
/// became present.
pub fn to_sorted_map<A, K, V, Fk, Fv>(
    key_mapper: Fk,
    value_mapper: Fv,
) -> ToSortedMapCollector<A, K, V, Fk, Fv, InsertionOrdered<V>>
where
    K: Ord + Clone,
    V: Eq + Hash + Clone,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
{
    to_sorted_map_with(key_mapper, value_mapper, IndexSet::new as InsertionOrdered<V>)
}

/// Like [`to_sorted_map()`], with each value set created by `value_set`.
pub fn to_sorted_map_with<A, K, V, S, Fk, Fv, Fs>(
    key_mapper: Fk,
    value_mapper: Fv,
    value_set: Fs,
) -> ToSortedMapCollector<A, K, V, Fk, Fv, Fs>
where
    K: Ord + Clone,
    V: Eq + Hash + Clone,
    S: Extend<V>,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
    Fs: Fn() -> S + Send + Sync,
{
    ToSortedMapCollector {
        key_mapper,
        value_mapper,
        value_set,
        _phantom: PhantomData,
    }
}

/// Creates a collector building a `HashMap` from each key to one value
/// merged from all distinct values under it.
///
/// Values are folded with `merge` in the order they first became present.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use streamforge_scoring::stream::collector::{to_map_merged, Collector};
///
/// // Longest name per age
/// let collector = to_map_merged(
///     |p: &(u32, &str)| p.0,
///     |p: &(u32, &str)| p.1.to_string(),
///     |a: &String, b: &String| if b.len() > a.len() { b.clone() } else { a.clone() },
/// );
/// let mut acc = collector.create_accumulator();
///
/// let _ann = collector.accumulate(&mut acc, &(20, "Ann"));
/// let eric = collector.accumulate(&mut acc, &(20, "Eric"));
/// assert_eq!(collector.finish(&acc), HashMap::from([(20, "Eric".to_string())]));
///
/// collector.retract(&mut acc, eric).unwrap();
/// assert_eq!(collector.finish(&acc), HashMap::from([(20, "Ann".to_string())]));
/// ```
pub fn to_map_merged<A, K, V, Fk, Fv, M>(
    key_mapper: Fk,
    value_mapper: Fv,
    merge: M,
) -> ToMapMergedCollector<A, K, V, Fk, Fv, M>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
    M: Fn(&V, &V) -> V + Send + Sync,
{
    ToMapMergedCollector {
        key_mapper,
        value_mapper,
        merge,
        _phantom: PhantomData,
    }
}

/// Creates a collector building a `BTreeMap` from each key to one merged
/// value.
pub fn to_sorted_map_merged<A, K, V, Fk, Fv, M>(
    key_mapper: Fk,
    value_mapper: Fv,
    merge: M,
) -> ToSortedMapMergedCollector<A, K, V, Fk, Fv, M>
where
    K: Ord + Clone,
    V: Eq + Hash + Clone,
    Fk: Fn(&A) -> K + Send + Sync,
    Fv: Fn(&A) -> V + Send + Sync,
    M: Fn(&V, &V) -> V + Send + Sync,
{
    ToSortedMapMergedCollector {
        key_mapper,
        value_mapper,
        merge,
        _phantom: PhantomData,
    }
}

// ============================================================================
// Multi-valued maps
// ============================================================================

macro_rules! impl_multi_map_collector {
    ($(#[$meta:meta])* $name:ident, $map:ident, [$($kb:tt)+]) => {
        $(#[$meta])*
        pub struct $name<A, K, V, Fk, Fv, Fs> {
            key_mapper: Fk,
            value_mapper: Fv,
            value_set: Fs,
            _phantom: PhantomData<fn(&A) -> (K, V)>,
        }

        impl<A, K, V, S, Fk, Fv, Fs> Collector<A> for $name<A, K, V, Fk, Fv, Fs>
        where
            K: $($kb)+ + Clone,
            V: Eq + Hash + Clone,
            S: Extend<V>,
            Fk: Fn(&A) -> K + Send + Sync,
            Fv: Fn(&A) -> V + Send + Sync,
            Fs: Fn() -> S + Send + Sync,
        {
            type Accumulator = $map<K, LinkedMultiplicityTracker<V>>;
            type Undo = EntryUndo<K, V>;
            type Result = $map<K, S>;

            fn create_accumulator(&self) -> Self::Accumulator {
                $map::new()
            }

            fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
                let key = (self.key_mapper)(tuple);
                let value = (self.value_mapper)(tuple);
                acc.entry(key.clone()).or_default().add(value.clone());
                EntryUndo { key, value }
            }

            fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
                let Some(values) = acc.get_mut(&undo.key) else {
                    return Err(missing_key::<K>());
                };
                values.remove(&undo.value)?;
                if values.is_empty() {
                    acc.remove(&undo.key);
                }
                Ok(())
            }

            fn finish(&self, acc: &Self::Accumulator) -> Self::Result {
                acc.iter()
                    .map(|(key, values)| {
                        let mut set = (self.value_set)();
                        set.extend(values.keys().cloned());
                        (key.clone(), set)
                    })
                    .collect()
            }
        }
    };
}

impl_multi_map_collector!(
    /// A collector mapping keys to value sets.
    ///
    /// Created by the [`to_map()`] and [`to_map_with()`] functions.
    ToMapCollector,
    HashMap,
    [Eq + Hash]
);

impl_multi_map_collector!(
    /// A collector mapping sorted keys to value sets.
    ///
    /// Created by the [`to_sorted_map()`] and [`to_sorted_map_with()`] functions.
    ToSortedMapCollector,
    BTreeMap,
    [Ord]
);

// ============================================================================
// Merged maps
// ============================================================================

/// The present values under one key and their merge.
#[derive(Debug, Clone)]
pub struct MergedValues<V> {
    counts: IndexMap<V, usize>,
    merged: Option<V>,
}

impl<V> Default for MergedValues<V> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
            merged: None,
        }
    }
}

impl<V> MergedValues<V>
where
    V: Eq + Hash + Clone,
{
    /// The merged value, `None` once every value has been removed.
    pub fn merged(&self) -> Option<&V> {
        self.merged.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add<M>(&mut self, value: V, merge: &M)
    where
        M: Fn(&V, &V) -> V,
    {
        let count = self.counts.entry(value).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.recompute(merge);
        }
    }

    fn remove<M>(&mut self, value: &V, merge: &M) -> Result<()>
    where
        M: Fn(&V, &V) -> V,
    {
        let Some(count) = self.counts.get_mut(value) else {
            return Err(missing_key::<V>());
        };
        *count -= 1;
        if *count == 0 {
            // shift_remove keeps first-insertion order for the fold
            self.counts.shift_remove(value);
            self.recompute(merge);
        }
        Ok(())
    }

    fn recompute<M>(&mut self, merge: &M)
    where
        M: Fn(&V, &V) -> V,
    {
        let mut values = self.counts.keys();
        self.merged = values
            .next()
            .map(|first| values.fold(first.clone(), |acc, v| merge(&acc, v)));
    }
}

macro_rules! impl_merged_map_collector {
    ($(#[$meta:meta])* $name:ident, $map:ident, [$($kb:tt)+]) => {
        $(#[$meta])*
        pub struct $name<A, K, V, Fk, Fv, M> {
            key_mapper: Fk,
            value_mapper: Fv,
            merge: M,
            _phantom: PhantomData<fn(&A) -> (K, V)>,
        }

        impl<A, K, V, Fk, Fv, M> Collector<A> for $name<A, K, V, Fk, Fv, M>
        where
            K: $($kb)+ + Clone,
            V: Eq + Hash + Clone,
            Fk: Fn(&A) -> K + Send + Sync,
            Fv: Fn(&A) -> V + Send + Sync,
            M: Fn(&V, &V) -> V + Send + Sync,
        {
            type Accumulator = $map<K, MergedValues<V>>;
            type Undo = EntryUndo<K, V>;
            type Result = $map<K, V>;

            fn create_accumulator(&self) -> Self::Accumulator {
                $map::new()
            }

            fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
                let key = (self.key_mapper)(tuple);
                let value = (self.value_mapper)(tuple);
                acc.entry(key.clone())
                    .or_default()
                    .add(value.clone(), &self.merge);
                EntryUndo { key, value }
            }

            fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
                let Some(values) = acc.get_mut(&undo.key) else {
                    return Err(missing_key::<K>());
                };
                values.remove(&undo.value, &self.merge)?;
                if values.is_empty() {
                    acc.remove(&undo.key);
                }
                Ok(())
            }

            fn finish(&self, acc: &Self::Accumulator) -> Self::Result {
                acc.iter()
                    .filter_map(|(key, values)| values.merged().map(|v| (key.clone(), v.clone())))
                    .collect()
            }
        }
    };
}

impl_merged_map_collector!(
    /// A collector mapping keys to merged values.
    ///
    /// Created by the [`to_map_merged()`] function.
    ToMapMergedCollector,
    HashMap,
    [Eq + Hash]
);

impl_merged_map_collector!(
    /// A collector mapping keys to merged values, sorted by key.
    ///
    /// Created by the [`to_sorted_map_merged()`] function.
    ToSortedMapMergedCollector,
    BTreeMap,
    [Ord]
);
