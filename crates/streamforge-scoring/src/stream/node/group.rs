//! Group node: one collector accumulator per group key.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::map::Entry;
use indexmap::IndexMap;
use streamforge_core::{Result, StreamError};
use tracing::{debug, error, trace};

use crate::stream::collector::Collector;

struct Group<Acc> {
    acc: Acc,
    size: usize,
}

/// Groups tuples by key and aggregates each group with a collector.
///
/// The undo token of every inserted tuple is kept under the tuple's id, so
/// retraction needs only the id. A group's accumulator is created with its
/// first tuple and dropped with its last.
///
/// # Example
///
/// ```
/// use streamforge_core::TupleId;
/// use streamforge_scoring::stream::collector::count_distinct;
/// use streamforge_scoring::stream::node::GroupNode;
///
/// // Distinct ages per initial letter
/// let mut node = GroupNode::new(
///     |p: &(&str, u32)| p.0.chars().next(),
///     count_distinct(|p: &(&str, u32)| p.1),
/// );
/// node.insert(TupleId(1), &("Ann", 20)).unwrap();
/// node.insert(TupleId(2), &("Amy", 25)).unwrap();
/// assert_eq!(node.result(&Some('A')), Some(2));
///
/// node.retract(TupleId(1)).unwrap();
/// node.retract(TupleId(2)).unwrap();
/// assert_eq!(node.group_count(), 0);
/// ```
pub struct GroupNode<T, I, K, KF, C>
where
    C: Collector<T>,
{
    key_fn: KF,
    collector: C,
    groups: IndexMap<K, Group<C::Accumulator>>,
    undos: HashMap<I, (K, C::Undo)>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, I, K, KF, C> GroupNode<T, I, K, KF, C>
where
    I: Eq + Hash + Display,
    K: Eq + Hash + Clone + Debug,
    KF: Fn(&T) -> K + Send + Sync,
    C: Collector<T>,
{
    pub fn new(key_fn: KF, collector: C) -> Self {
        Self {
            key_fn,
            collector,
            groups: IndexMap::new(),
            undos: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    pub fn collector(&self) -> &C {
        &self.collector
    }

    /// Adds a tuple to its group. Returns the key of the changed group.
    pub fn insert(&mut self, id: I, tuple: &T) -> Result<K> {
        if self.undos.contains_key(&id) {
            let err = StreamError::DuplicateTuple(id.to_string());
            error!(event = "duplicate_insert", "{err}");
            return Err(err);
        }
        let key = (self.key_fn)(tuple);
        let group = match self.groups.entry(key.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(event = "group_created", key = ?entry.key());
                entry.insert(Group {
                    acc: self.collector.create_accumulator(),
                    size: 0,
                })
            }
        };
        let undo = self.collector.accumulate(&mut group.acc, tuple);
        group.size += 1;
        trace!(event = "group_insert", id = %id, key = ?key, size = group.size);
        self.undos.insert(id, (key.clone(), undo));
        Ok(key)
    }

    /// Removes a tuple from its group. Returns the key of the changed group.
    ///
    /// Retracting an id that is not inserted, including a second retract of
    /// the same id, fails with [`StreamError::UnknownTuple`].
    pub fn retract(&mut self, id: I) -> Result<K> {
        let Some((key, undo)) = self.undos.remove(&id) else {
            let err = StreamError::UnknownTuple(id.to_string());
            error!(event = "unknown_retract", "{err}");
            return Err(err);
        };
        let Some(group) = self.groups.get_mut(&key) else {
            let err = StreamError::UnknownTuple(format!("{id} in group {key:?}"));
            error!(event = "missing_group", "{err}");
            return Err(err);
        };
        self.collector.retract(&mut group.acc, undo)?;
        group.size -= 1;
        trace!(event = "group_retract", id = %id, key = ?key, size = group.size);
        if group.size == 0 {
            self.groups.swap_remove(&key);
            debug!(event = "group_reclaimed", key = ?key);
        }
        Ok(key)
    }

    /// Moves a tuple to its new state: a retract followed by an insert.
    ///
    /// Returns the old and new group keys, which may be equal.
    pub fn update(&mut self, id: I, tuple: &T) -> Result<(K, K)>
    where
        I: Clone,
    {
        let old = self.retract(id.clone())?;
        let new = self.insert(id, tuple)?;
        Ok((old, new))
    }

    /// Current result of one group, `None` if the group has no tuples.
    pub fn result(&self, key: &K) -> Option<C::Result> {
        self.groups
            .get(key)
            .map(|group| self.collector.finish(&group.acc))
    }

    /// Results of all non-empty groups.
    pub fn results(&self) -> Vec<(K, C::Result)> {
        self.groups
            .iter()
            .map(|(key, group)| (key.clone(), self.collector.finish(&group.acc)))
            .collect()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn tuple_count(&self) -> usize {
        self.undos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undos.is_empty()
    }
}
