use crate::CheckpointStoreError;

use parking_lot::Mutex;
use rollup_node_primitives::Eth1Checkpoint;
use std::sync::Arc;

mod database;

/// A durable store for the [`Eth1Checkpoint`].
///
/// The store is read once at startup and written after every processed L1 header.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc)]
pub trait CheckpointStore: Send + Sync {
    /// Returns the stored checkpoint, if any.
    async fn get(&self) -> Result<Option<Eth1Checkpoint>, CheckpointStoreError>;

    /// Overwrites the stored checkpoint.
    async fn put(&self, checkpoint: Eth1Checkpoint) -> Result<(), CheckpointStoreError>;
}

/// An in-memory [`CheckpointStore`]. Clones share the stored checkpoint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCheckpointStore {
    checkpoint: Arc<Mutex<Option<Eth1Checkpoint>>>,
}

impl InMemoryCheckpointStore {
    /// Returns a new store holding the provided checkpoint.
    pub fn new(checkpoint: Option<Eth1Checkpoint>) -> Self {
        Self { checkpoint: Arc::new(Mutex::new(checkpoint)) }
    }
}

#[async_trait::async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn get(&self) -> Result<Option<Eth1Checkpoint>, CheckpointStoreError> {
        Ok(*self.checkpoint.lock())
    }

    async fn put(&self, checkpoint: Eth1Checkpoint) -> Result<(), CheckpointStoreError> {
        *self.checkpoint.lock() = Some(checkpoint);
        Ok(())
    }
}
