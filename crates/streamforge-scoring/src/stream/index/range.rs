//! Sorted index for ordering joins.

use std::collections::BTreeMap;
use std::ops::Bound;

use streamforge_core::TupleId;

use super::{remove_from_bucket, Bucket, JoinIndex};
use crate::stream::joiner::JoinerType;

/// Keys kept in a `BTreeMap` so that every ordering comparison is one range
/// query.
#[derive(Debug)]
pub struct RangeIndex<K> {
    joiner_type: JoinerType,
    buckets: BTreeMap<K, Bucket>,
    len: usize,
}

impl<K> RangeIndex<K> {
    pub fn joiner_type(&self) -> JoinerType {
        self.joiner_type
    }
}

impl<K> JoinIndex<K> for RangeIndex<K>
where
    K: Ord,
{
    fn new(joiner_type: JoinerType) -> Self {
        Self {
            joiner_type,
            buckets: BTreeMap::new(),
            len: 0,
        }
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
        // stored OP probe
        let bounds: (Bound<&K>, Bound<&K>) = match self.joiner_type {
            JoinerType::LessThan => (Bound::Unbounded, Bound::Excluded(probe)),
            JoinerType::LessThanOrEqual => (Bound::Unbounded, Bound::Included(probe)),
            JoinerType::GreaterThan => (Bound::Excluded(probe), Bound::Unbounded),
            JoinerType::GreaterThanOrEqual => (Bound::Included(probe), Bound::Unbounded),
            JoinerType::Equal => (Bound::Included(probe), Bound::Included(probe)),
            JoinerType::Filtering => (Bound::Unbounded, Bound::Unbounded),
        };
        for bucket in self.buckets.range::<K, _>(bounds).map(|(_, bucket)| bucket) {
            bucket.iter().copied().for_each(&mut f);
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
