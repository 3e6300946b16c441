//! Multiplicity trackers.
//!
//! A tracker maps each value to the number of times it is currently present.
//! Entries are reclaimed the moment their count drops to zero, so the key set
//! is always exactly the set of present values.
//!
//! Values must not be mutated while tracked.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use streamforge_core::{Result, StreamError};
use tracing::error;

fn underflow<K>() -> StreamError {
    let err = StreamError::underflow::<K>();
    error!("{err}");
    err
}

macro_rules! impl_tracker {
    ($(#[$meta:meta])* $name:ident, $map:ident, $remove:ident, $($bound:tt)+) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<K> {
            counts: $map<K, usize>,
        }

        impl<K> Default for $name<K> {
            fn default() -> Self {
                Self {
                    counts: $map::new(),
                }
            }
        }

        impl<K> $name<K>
        where
            K: $($bound)+,
        {
            pub fn new() -> Self {
                Self::default()
            }

            /// Adds one occurrence of `key` and returns its new count.
            pub fn add(&mut self, key: K) -> usize {
                let count = self.counts.entry(key).or_insert(0);
                *count += 1;
                *count
            }

            /// Removes one occurrence of `key` and returns its remaining count.
            ///
            /// Fails with [`StreamError::Underflow`] if `key` is not present.
            pub fn remove(&mut self, key: &K) -> Result<usize> {
                let Some(count) = self.counts.get_mut(key) else {
                    return Err(underflow::<K>());
                };
                *count -= 1;
                let remaining = *count;
                if remaining == 0 {
                    self.counts.$remove(key);
                }
                Ok(remaining)
            }

            /// Current count of `key`, zero if absent.
            pub fn count(&self, key: &K) -> usize {
                self.counts.get(key).copied().unwrap_or(0)
            }

            pub fn contains(&self, key: &K) -> bool {
                self.counts.contains_key(key)
            }

            /// Number of distinct present values.
            pub fn len(&self) -> usize {
                self.counts.len()
            }

            pub fn is_empty(&self) -> bool {
                self.counts.is_empty()
            }

            pub fn keys(&self) -> impl Iterator<Item = &K> {
                self.counts.keys()
            }

            pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
                self.counts.iter().map(|(k, &count)| (k, count))
            }
        }
    };
}

impl_tracker!(
    /// Hash-based tracker for values with `Eq + Hash`.
    MultiplicityTracker,
    HashMap,
    remove,
    Eq + Hash
);

impl_tracker!(
    /// Tracker ordered by the values' `Ord`.
    SortedMultiplicityTracker,
    BTreeMap,
    remove,
    Ord
);

impl_tracker!(
    /// Tracker iterating values in the order they became present.
    ///
    /// A value whose count drops to zero loses its place; adding it again
    /// puts it last.
    LinkedMultiplicityTracker,
    IndexMap,
    shift_remove,
    Eq + Hash
);

impl<K: Ord> SortedMultiplicityTracker<K> {
    /// Least present value.
    pub fn first(&self) -> Option<&K> {
        self.counts.keys().next()
    }

    /// Greatest present value.
    pub fn last(&self) -> Option<&K> {
        self.counts.keys().next_back()
    }
}

// A tracked value paired with the comparator that orders it.
struct Ranked<K, C> {
    key: K,
    comparator: Arc<C>,
}

impl<K, C> PartialEq for Ranked<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, C> Eq for Ranked<K, C> where C: Fn(&K, &K) -> Ordering {}

impl<K, C> PartialOrd for Ranked<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, C> Ord for Ranked<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        (self.comparator)(&self.key, &other.key)
    }
}

/// Tracker ordered by a caller-supplied comparator.
///
/// The comparator is shared through an `Arc`, so one collector hands the
/// same comparator to all of its accumulators. Values that compare equal
/// share one slot, which keeps the first value inserted into it. The
/// comparator must be a total order.
pub struct ComparatorTracker<K, C> {
    counts: BTreeMap<Ranked<K, C>, usize>,
    comparator: Arc<C>,
}

impl<K, C> ComparatorTracker<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(comparator: Arc<C>) -> Self {
        Self {
            counts: BTreeMap::new(),
            comparator,
        }
    }

    fn rank(&self, key: K) -> Ranked<K, C> {
        Ranked {
            key,
            comparator: Arc::clone(&self.comparator),
        }
    }

    /// Adds one occurrence of `key` and returns the slot's new count.
    pub fn add(&mut self, key: K) -> usize {
        let ranked = self.rank(key);
        let count = self.counts.entry(ranked).or_insert(0);
        *count += 1;
        *count
    }

    /// Removes one occurrence from the slot `key` compares equal to.
    pub fn remove(&mut self, key: K) -> Result<usize> {
        let ranked = self.rank(key);
        let Some(count) = self.counts.get_mut(&ranked) else {
            return Err(underflow::<K>());
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(&ranked);
        }
        Ok(remaining)
    }

    /// Number of distinct slots.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Least present value by the comparator.
    pub fn first(&self) -> Option<&K> {
        self.counts.keys().next().map(|r| &r.key)
    }

    /// Greatest present value by the comparator.
    pub fn last(&self) -> Option<&K> {
        self.counts.keys().next_back().map(|r| &r.key)
    }

    /// Present values in comparator order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys().map(|r| &r.key)
    }
}

impl<K: fmt::Debug, C> fmt::Debug for ComparatorTracker<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.counts.iter().map(|(r, count)| (&r.key, count)))
            .finish()
    }
}
