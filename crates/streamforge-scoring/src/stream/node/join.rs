//! Join node: pairs left tuples with right facts through an index.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use streamforge_config::StreamConfig;
use streamforge_core::{Append, JoinedId, Result, StreamError, TupleId};
use tracing::{debug, error, trace, warn};

use crate::stream::index::JoinIndex;
use crate::stream::joiner::IndexedJoiner;

/// Change in the join output caused by one insert or retract.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinEvent<T> {
    /// A new pair matched; `tuple` is the left tuple widened by the right fact.
    Inserted { id: JoinedId, tuple: T },
    /// A previously emitted pair no longer exists.
    Retracted { id: JoinedId },
}

impl<T> JoinEvent<T> {
    pub fn id(&self) -> JoinedId {
        match self {
            JoinEvent::Inserted { id, .. } | JoinEvent::Retracted { id } => *id,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, JoinEvent::Inserted { .. })
    }
}

#[derive(Debug)]
struct Stored<T, K> {
    value: T,
    key: K,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn label(self, id: TupleId) -> String {
        match self {
            Side::Left => format!("left {id}"),
            Side::Right => format!("right {id}"),
        }
    }
}

/// Joins left tuples of arity 1..4 with right facts.
///
/// Both sides are indexed on the joiner's leading indexable condition; the
/// left index answers `left_key OP probe` and the right index answers the
/// flipped comparison. Every candidate an index returns is re-checked with
/// the full joiner before it is emitted.
///
/// Keys are computed once, on insert. Facts must not change while inserted;
/// change them with a retract followed by an insert.
pub struct JoinNode<L, R, J>
where
    J: IndexedJoiner<L, R>,
{
    joiner: J,
    left_tuples: IndexMap<TupleId, Stored<L, J::Key>>,
    right_facts: IndexMap<TupleId, Stored<R, J::Key>>,
    left_index: J::Index,
    right_index: J::Index,
    left_matches: HashMap<TupleId, IndexSet<TupleId>>,
    right_matches: HashMap<TupleId, IndexSet<TupleId>>,
    use_index: bool,
    assert_index: bool,
}

impl<L, R, J> JoinNode<L, R, J>
where
    L: Append<R> + Clone,
    R: Clone,
    J: IndexedJoiner<L, R>,
{
    /// Creates an indexed join node with no cross-checking.
    pub fn new(joiner: J) -> Self {
        Self::with_options(joiner, true, false)
    }

    /// Creates a join node honouring `index_joins` and the environment mode.
    ///
    /// Asserted modes compare every indexed lookup against a full scan.
    pub fn from_config(joiner: J, config: &StreamConfig) -> Self {
        Self::with_options(
            joiner,
            config.index_joins,
            config.environment_mode.is_asserted(),
        )
    }

    fn with_options(joiner: J, use_index: bool, assert_index: bool) -> Self {
        let index_type = joiner.index_type();
        debug!(
            event = "join_node_built",
            index_type = ?index_type,
            joiner_types = ?joiner.joiner_types(),
            use_index,
            assert_index,
        );
        Self {
            left_index: <J::Index as JoinIndex<J::Key>>::new(index_type),
            right_index: <J::Index as JoinIndex<J::Key>>::new(index_type.flip()),
            joiner,
            left_tuples: IndexMap::new(),
            right_facts: IndexMap::new(),
            left_matches: HashMap::new(),
            right_matches: HashMap::new(),
            use_index,
            assert_index,
        }
    }

    pub fn joiner(&self) -> &J {
        &self.joiner
    }

    /// Whether lookups go through the index rather than a scan.
    pub fn is_indexed(&self) -> bool {
        self.use_index
    }

    pub fn left_count(&self) -> usize {
        self.left_tuples.len()
    }

    pub fn right_count(&self) -> usize {
        self.right_facts.len()
    }

    /// Number of joined pairs currently emitted.
    pub fn output_count(&self) -> usize {
        self.left_matches.values().map(IndexSet::len).sum()
    }

    /// Inserts a left tuple and emits one insert per matching right fact.
    pub fn insert_left(&mut self, id: TupleId, left: L) -> Result<Vec<JoinEvent<L::Output>>> {
        if self.left_tuples.contains_key(&id) {
            return Err(duplicate(Side::Left, id));
        }
        let key = self.joiner.left_key(&left);
        let matched = self.matching_right(&key, &left)?;
        trace!(event = "insert_left", id = %id, matches = matched.len());

        let mut events = Vec::with_capacity(matched.len());
        for &right_id in &matched {
            if let Some(right) = self.right_facts.get(&right_id) {
                events.push(JoinEvent::Inserted {
                    id: JoinedId::new(id, right_id),
                    tuple: left.clone().append(right.value.clone()),
                });
                self.right_matches.entry(right_id).or_default().insert(id);
            }
        }
        self.left_matches.insert(id, matched);
        self.left_index.put(key.clone(), id);
        self.left_tuples.insert(id, Stored { value: left, key });
        Ok(events)
    }

    /// Inserts a right fact and emits one insert per matching left tuple.
    pub fn insert_right(&mut self, id: TupleId, right: R) -> Result<Vec<JoinEvent<L::Output>>> {
        if self.right_facts.contains_key(&id) {
            return Err(duplicate(Side::Right, id));
        }
        let key = self.joiner.right_key(&right);
        let matched = self.matching_left(&key, &right)?;
        trace!(event = "insert_right", id = %id, matches = matched.len());

        let mut events = Vec::with_capacity(matched.len());
        for &left_id in &matched {
            if let Some(left) = self.left_tuples.get(&left_id) {
                events.push(JoinEvent::Inserted {
                    id: JoinedId::new(left_id, id),
                    tuple: left.value.clone().append(right.clone()),
                });
                self.left_matches.entry(left_id).or_default().insert(id);
            }
        }
        self.right_matches.insert(id, matched);
        self.right_index.put(key.clone(), id);
        self.right_facts.insert(id, Stored { value: right, key });
        Ok(events)
    }

    /// Retracts a left tuple and every pair it took part in.
    pub fn retract_left(&mut self, id: TupleId) -> Result<Vec<JoinEvent<L::Output>>> {
        let Some(stored) = self.left_tuples.get(&id) else {
            return Err(unknown(Side::Left, id));
        };
        if !self.left_index.remove(&stored.key, id) {
            self.index_drift(Side::Left, id)?;
        }
        self.left_tuples.swap_remove(&id);
        let matched = self.left_matches.remove(&id).unwrap_or_default();
        trace!(event = "retract_left", id = %id, matches = matched.len());

        let mut events = Vec::with_capacity(matched.len());
        for right_id in matched {
            if let Some(lefts) = self.right_matches.get_mut(&right_id) {
                lefts.swap_remove(&id);
            }
            events.push(JoinEvent::Retracted {
                id: JoinedId::new(id, right_id),
            });
        }
        Ok(events)
    }

    /// Retracts a right fact and every pair it took part in.
    pub fn retract_right(&mut self, id: TupleId) -> Result<Vec<JoinEvent<L::Output>>> {
        let Some(stored) = self.right_facts.get(&id) else {
            return Err(unknown(Side::Right, id));
        };
        if !self.right_index.remove(&stored.key, id) {
            self.index_drift(Side::Right, id)?;
        }
        self.right_facts.swap_remove(&id);
        let matched = self.right_matches.remove(&id).unwrap_or_default();
        trace!(event = "retract_right", id = %id, matches = matched.len());

        let mut events = Vec::with_capacity(matched.len());
        for left_id in matched {
            if let Some(rights) = self.left_matches.get_mut(&left_id) {
                rights.swap_remove(&id);
            }
            events.push(JoinEvent::Retracted {
                id: JoinedId::new(left_id, id),
            });
        }
        Ok(events)
    }

    // The stored key no longer finds the tuple in its index.
    fn index_drift(&self, side: Side, id: TupleId) -> Result<()> {
        if self.assert_index {
            let err = StreamError::IndexMismatch {
                indexed: 0,
                scanned: 1,
            };
            error!(event = "index_drift", tuple = %side.label(id), "{err}");
            return Err(err);
        }
        warn!(event = "index_drift", tuple = %side.label(id));
        Ok(())
    }

    fn matching_right(&self, key: &J::Key, left: &L) -> Result<IndexSet<TupleId>> {
        let scan = || -> IndexSet<TupleId> {
            self.right_facts
                .iter()
                .filter(|(_, right)| self.joiner.matches(left, &right.value))
                .map(|(&id, _)| id)
                .collect()
        };
        if !self.use_index {
            return Ok(scan());
        }
        let matched: IndexSet<TupleId> = self
            .right_index
            .matches(key)
            .into_iter()
            .filter(|id| {
                self.right_facts
                    .get(id)
                    .is_some_and(|right| self.joiner.matches(left, &right.value))
            })
            .collect();
        if self.assert_index {
            check_against_scan(matched.len(), scan().len())?;
        }
        Ok(matched)
    }

    fn matching_left(&self, key: &J::Key, right: &R) -> Result<IndexSet<TupleId>> {
        let scan = || -> IndexSet<TupleId> {
            self.left_tuples
                .iter()
                .filter(|(_, left)| self.joiner.matches(&left.value, right))
                .map(|(&id, _)| id)
                .collect()
        };
        if !self.use_index {
            return Ok(scan());
        }
        let matched: IndexSet<TupleId> = self
            .left_index
            .matches(key)
            .into_iter()
            .filter(|id| {
                self.left_tuples
                    .get(id)
                    .is_some_and(|left| self.joiner.matches(&left.value, right))
            })
            .collect();
        if self.assert_index {
            check_against_scan(matched.len(), scan().len())?;
        }
        Ok(matched)
    }
}

fn check_against_scan(indexed: usize, scanned: usize) -> Result<()> {
    if indexed == scanned {
        return Ok(());
    }
    let err = StreamError::IndexMismatch { indexed, scanned };
    error!(event = "index_mismatch", indexed, scanned, "{err}");
    Err(err)
}

fn duplicate(side: Side, id: TupleId) -> StreamError {
    let err = StreamError::DuplicateTuple(side.label(id));
    error!(event = "duplicate_insert", "{err}");
    err
}

fn unknown(side: Side, id: TupleId) -> StreamError {
    let err = StreamError::UnknownTuple(side.label(id));
    error!(event = "unknown_retract", "{err}");
    err
}
