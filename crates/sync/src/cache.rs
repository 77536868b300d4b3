use parking_lot::Mutex;
use rollup_node_primitives::RollupTransaction;
use std::{collections::HashMap, ops::Range, sync::Arc};

/// The cache of the transactions enqueued on L1 which have not yet been appended to a batch.
///
/// Entries are keyed by queue index, inserted once when enqueued and removed once when appended.
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct TransactionCache {
    entries: Arc<Mutex<HashMap<u64, RollupTransaction>>>,
}

impl TransactionCache {
    /// Inserts the transaction at its queue index, overwriting any previous entry.
    pub fn put(&self, tx: RollupTransaction) {
        self.entries.lock().insert(tx.queue_index, tx);
    }

    /// Removes and returns the transaction at the queue index.
    pub fn take(&self, queue_index: u64) -> Option<RollupTransaction> {
        self.entries.lock().remove(&queue_index)
    }

    /// Returns a copy of the transaction at the queue index.
    pub fn get(&self, queue_index: u64) -> Option<RollupTransaction> {
        self.entries.lock().get(&queue_index).cloned()
    }

    /// Returns true if the cache holds a transaction at the queue index.
    pub fn contains(&self, queue_index: u64) -> bool {
        self.entries.lock().contains_key(&queue_index)
    }

    /// Returns the first queue index of the range missing from the cache.
    pub fn first_missing(&self, range: Range<u64>) -> Option<u64> {
        let entries = self.entries.lock();
        range.into_iter().find(|index| !entries.contains_key(index))
    }

    /// Returns the number of cached transactions.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
