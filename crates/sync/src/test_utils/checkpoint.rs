use rollup_node_primitives::Eth1Checkpoint;
use rollup_node_providers::{CheckpointStore, CheckpointStoreError, InMemoryCheckpointStore};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A [`CheckpointStore`] held in memory which can be set to fail its writes.
#[derive(Debug, Clone, Default)]
pub struct MockCheckpointStore {
    inner: InMemoryCheckpointStore,
    fail_puts: Arc<AtomicBool>,
}

impl MockCheckpointStore {
    /// Sets whether the writes to the store should fail.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl CheckpointStore for MockCheckpointStore {
    async fn get(&self) -> Result<Option<Eth1Checkpoint>, CheckpointStoreError> {
        self.inner.get().await
    }

    async fn put(&self, checkpoint: Eth1Checkpoint) -> Result<(), CheckpointStoreError> {
        if self.fail_puts.load(Ordering::Relaxed) {
            return Err(CheckpointStoreError::Unavailable("mock failure".to_string()));
        }
        self.inner.put(checkpoint).await
    }
}
