//! Deduplicated values shared by batches.

use rustc_hash::FxHashSet;

use crate::value::Value;

/// Index of a batch of values. Valid batch indices start at 1.
pub type BatchIndex = u32;

/// One distinct value of an item together with every batch that supplied it.
///
/// A member never outlives its last batch: the owning item drops it as soon
/// as the batch set becomes empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    value: Value,
    batches: FxHashSet<BatchIndex>,
}

impl Member {
    pub(crate) fn new(value: Value, batch: BatchIndex) -> Self {
        let mut batches = FxHashSet::default();
        batches.insert(batch);
        Self { value, batches }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Batches holding this value, in no particular order.
    pub fn batches(&self) -> impl Iterator<Item = BatchIndex> + '_ {
        self.batches.iter().copied()
    }

    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    #[must_use]
    pub fn holds(&self, batch: BatchIndex) -> bool {
        self.batches.contains(&batch)
    }

    pub(crate) fn insert(&mut self, batch: BatchIndex) -> bool {
        self.batches.insert(batch)
    }

    pub(crate) fn remove(&mut self, batch: BatchIndex) -> bool {
        self.batches.remove(&batch)
    }

    pub(crate) fn is_orphaned(&self) -> bool {
        self.batches.is_empty()
    }
}
