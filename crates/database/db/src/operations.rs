use super::{models, DatabaseError};
use crate::DatabaseConnectionProvider;

use alloy_primitives::B256;
use rollup_node_primitives::Eth1Checkpoint;
use sea_orm::{sea_query::OnConflict, EntityTrait};

/// The metadata key of the checkpoint block height.
pub const ETH1_CHECKPOINT_HEIGHT_KEY: &str = "eth1_checkpoint_height";

/// The metadata key of the checkpoint block hash.
pub const ETH1_CHECKPOINT_HASH_KEY: &str = "eth1_checkpoint_hash";

/// The [`DatabaseOperations`] trait provides methods for interacting with the database.
#[async_trait::async_trait]
pub trait DatabaseOperations: DatabaseConnectionProvider {
    /// Sets the metadata value for the provided key, overwriting any previous value.
    async fn set_metadata(&self, key: &'static str, value: String) -> Result<(), DatabaseError> {
        tracing::trace!(target: "rollup::db", key, value = %value, "Setting metadata in database.");
        let model = models::metadata::ActiveModel::new(key, value);
        models::metadata::Entity::insert(model)
            .on_conflict(
                OnConflict::column(models::metadata::Column::Key)
                    .update_column(models::metadata::Column::Value)
                    .to_owned(),
            )
            .exec(self.get_connection())
            .await?;
        Ok(())
    }

    /// Gets the metadata value for the provided key.
    async fn get_metadata(&self, key: &'static str) -> Result<Option<String>, DatabaseError> {
        Ok(models::metadata::Entity::find_by_id(key.to_owned())
            .one(self.get_connection())
            .await?
            .map(|model| model.value))
    }

    /// Sets the [`Eth1Checkpoint`].
    ///
    /// The height and hash are stored under separate keys. Callers requiring the pair to be
    /// written atomically should call this method on a [`crate::DatabaseTransaction`].
    async fn set_eth1_checkpoint(&self, checkpoint: Eth1Checkpoint) -> Result<(), DatabaseError> {
        tracing::trace!(target: "rollup::db", %checkpoint, "Setting eth1 checkpoint in database.");
        self.set_metadata(ETH1_CHECKPOINT_HEIGHT_KEY, checkpoint.block_height.to_string()).await?;
        self.set_metadata(ETH1_CHECKPOINT_HASH_KEY, checkpoint.block_hash.to_string()).await?;
        Ok(())
    }

    /// Gets the [`Eth1Checkpoint`], if one was stored.
    async fn get_eth1_checkpoint(&self) -> Result<Option<Eth1Checkpoint>, DatabaseError> {
        let height = self.get_metadata(ETH1_CHECKPOINT_HEIGHT_KEY).await?;
        let hash = self.get_metadata(ETH1_CHECKPOINT_HASH_KEY).await?;

        let (Some(height), Some(hash)) = (height, hash) else { return Ok(None) };
        let block_height = height.parse::<u64>().map_err(|_| DatabaseError::InvalidMetadata {
            key: ETH1_CHECKPOINT_HEIGHT_KEY,
            value: height.clone(),
        })?;
        let block_hash = hash.parse::<B256>().map_err(|_| DatabaseError::InvalidMetadata {
            key: ETH1_CHECKPOINT_HASH_KEY,
            value: hash.clone(),
        })?;

        Ok(Some(Eth1Checkpoint { block_height, block_hash }))
    }
}

impl<T> DatabaseOperations for T where T: DatabaseConnectionProvider + Sync {}
