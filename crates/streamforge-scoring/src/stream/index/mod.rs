//! Join indexes.
//!
//! An index stores tuple ids under a key and answers "which stored ids
//! satisfy `stored OP probe`" for the [`JoinerType`] it was built with.
//! A join node keeps two of them: the left side built with the joiner's
//! type and the right side built with the flipped type, so both directions
//! read as `left_key OP right_key`.

mod hash;
mod range;
mod scan;


pub use hash::HashIndex;
pub use range::RangeIndex;
pub use scan::ScanIndex;

use streamforge_core::TupleId;

use crate::stream::joiner::JoinerType;

/// Storage for one side of a join, keyed by the joiner's mapped value.
pub trait JoinIndex<K> {
    /// Creates an empty index answering `stored OP probe` for `joiner_type`.
    fn new(joiner_type: JoinerType) -> Self;

    /// Stores `id` under `key`.
    fn put(&mut self, key: K, id: TupleId);

    /// Removes `id` from under `key`. Returns false if it was not there.
    fn remove(&mut self, key: &K, id: TupleId) -> bool;

    /// Calls `f` with every stored id whose key satisfies the comparison
    /// against `probe`.
    fn for_each_match<F>(&self, probe: &K, f: F)
    where
        F: FnMut(TupleId);

    /// Number of stored ids.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the ids [`for_each_match`](JoinIndex::for_each_match) would visit.
    fn matches(&self, probe: &K) -> Vec<TupleId> {
        let mut ids = Vec::new();
        self.for_each_match(probe, |id| ids.push(id));
        ids
    }
}

/// Ids sharing one key. Most keys hold only a handful.
pub(crate) type Bucket = smallvec::SmallVec<[TupleId; 4]>;

/// Removes `id` from `bucket`, keeping the order of the rest.
pub(crate) fn remove_from_bucket(bucket: &mut Bucket, id: TupleId) -> bool {
    match bucket.iter().position(|&stored| stored == id) {
        Some(pos) => {
            bucket.remove(pos);
            true
        }
        None => false,
    }
}
