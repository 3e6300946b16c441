//! Scan "index" for joins with no indexable condition.

use indexmap::IndexSet;
use streamforge_core::TupleId;

use super::JoinIndex;
use crate::stream::joiner::JoinerType;

/// Returns every stored id for every probe.
#[derive(Debug, Default)]
pub struct ScanIndex {
    ids: IndexSet<TupleId>,
}

impl JoinIndex<()> for ScanIndex {
    fn new(_joiner_type: JoinerType) -> Self {
        Self::default()
    }

    fn put(&mut self, _key: (), id: TupleId) {
        self.ids.insert(id);
    }

    fn remove(&mut self, _key: &(), id: TupleId) -> bool {
        self.ids.shift_remove(&id)
    }

    fn for_each_match<F>(&self, _probe: &(), f: F)
    where
        F: FnMut(TupleId),
    {
        self.ids.iter().copied().for_each(f);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
