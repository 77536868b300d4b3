use super::CheckpointStore;
use crate::CheckpointStoreError;

use rollup_node_db::{Database, DatabaseOperations};
use rollup_node_primitives::Eth1Checkpoint;

#[async_trait::async_trait]
impl CheckpointStore for Database {
    async fn get(&self) -> Result<Option<Eth1Checkpoint>, CheckpointStoreError> {
        Ok(self.get_eth1_checkpoint().await?)
    }

    async fn put(&self, checkpoint: Eth1Checkpoint) -> Result<(), CheckpointStoreError> {
        let tx = self.tx().await?;
        tx.set_eth1_checkpoint(checkpoint).await?;
        tx.commit().await?;
        tracing::trace!(target: "rollup::providers", %checkpoint, "Persisted eth1 checkpoint");
        Ok(())
    }
}
