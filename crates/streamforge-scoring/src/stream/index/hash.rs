//! Hash index for equality joins.

use std::collections::HashMap;
use std::hash::Hash;

use streamforge_core::TupleId;

use super::{remove_from_bucket, Bucket, JoinIndex};
use crate::stream::joiner::JoinerType;

/// Maps each key to the ids stored under it.
///
/// Only answers [`JoinerType::Equal`]; equality is symmetric so both sides
/// of a join use the same lookup.
#[derive(Debug)]
pub struct HashIndex<K> {
    buckets: HashMap<K, Bucket>,
    len: usize,
}

impl<K> Default for HashIndex<K> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            len: 0,
        }
    }
}

impl<K> HashIndex<K>
where
    K: Eq + Hash,
{
    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }
}

impl<K> JoinIndex<K> for HashIndex<K>
where
    K: Eq + Hash,
{
    fn new(joiner_type: JoinerType) -> Self {
        debug_assert_eq!(joiner_type, JoinerType::Equal);
        Self::default()
    }

    fn put(&mut self, key: K, id: TupleId) {
        self.buckets.entry(key).or_default().push(id);
        self.len += 1;
    }

    fn remove(&mut self, key: &K, id: TupleId) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        if !remove_from_bucket(bucket, id) {
            return false;
        }
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        self.len -= 1;
        true
    }

    fn for_each_match<F>(&self, probe: &K, mut f: F)
    where
        F: FnMut(TupleId),
    {
        if let Some(bucket) = self.buckets.get(probe) {
            bucket.iter().copied().for_each(&mut f);
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
