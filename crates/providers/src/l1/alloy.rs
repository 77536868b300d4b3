use super::{L1Client, LogFilterer};
use crate::L1ProviderError;

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Header, Log, SyncStatus, Transaction};
use futures::{stream::BoxStream, StreamExt};

/// Implementation of the L1 collaborators on top of an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct AlloyL1Provider<P> {
    /// The inner provider.
    provider: P,
}

impl<P> AlloyL1Provider<P> {
    /// Returns a new [`AlloyL1Provider`] wrapping the provided provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the inner provider.
    pub const fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait::async_trait]
impl<P: Provider> LogFilterer for AlloyL1Provider<P> {
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>, L1ProviderError> {
        tracing::trace!(target: "rollup::providers", ?filter, "Fetching logs");
        Ok(self.provider.get_logs(filter).await?)
    }

    async fn subscribe_filter_logs(
        &self,
        filter: &Filter,
    ) -> Result<BoxStream<'static, Log>, L1ProviderError> {
        tracing::debug!(target: "rollup::providers", ?filter, "Subscribing to logs");
        let subscription = self.provider.subscribe_logs(filter).await?;
        Ok(subscription.into_stream().boxed())
    }
}

#[async_trait::async_trait]
impl<P: Provider> L1Client for AlloyL1Provider<P> {
    async fn chain_id(&self) -> Result<u64, L1ProviderError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn network_id(&self) -> Result<u64, L1ProviderError> {
        Ok(self.provider.get_net_version().await?)
    }

    async fn sync_progress(&self) -> Result<SyncStatus, L1ProviderError> {
        Ok(self.provider.syncing().await?)
    }

    async fn header_by_number(
        &self,
        number: Option<u64>,
    ) -> Result<Option<Header>, L1ProviderError> {
        let tag = number.map(BlockNumberOrTag::Number).unwrap_or(BlockNumberOrTag::Latest);
        Ok(self.provider.get_block_by_number(tag).await?.map(|block| block.header))
    }

    async fn transaction_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<Transaction>, L1ProviderError> {
        Ok(self.provider.get_transaction_by_hash(hash).await?)
    }
}
