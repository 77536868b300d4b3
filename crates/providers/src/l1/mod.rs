use crate::L1ProviderError;

use alloy_primitives::B256;
use alloy_rpc_types_eth::{Filter, Header, Log, SyncStatus, Transaction};
use futures::stream::BoxStream;

mod alloy;
pub use alloy::AlloyL1Provider;

/// A client that filters the logs of the L1 chain.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc)]
pub trait LogFilterer: Send + Sync {
    /// Returns all the logs matching the filter, in chain order.
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>, L1ProviderError>;

    /// Returns a stream of the logs matching the filter, as they are emitted.
    async fn subscribe_filter_logs(
        &self,
        filter: &Filter,
    ) -> Result<BoxStream<'static, Log>, L1ProviderError>;
}

/// A client of the L1 node, used for bootstrapping and validation.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc)]
pub trait L1Client: Send + Sync {
    /// Returns the chain id of the L1.
    async fn chain_id(&self) -> Result<u64, L1ProviderError>;

    /// Returns the network id of the L1.
    async fn network_id(&self) -> Result<u64, L1ProviderError>;

    /// Returns the sync status of the L1 node.
    async fn sync_progress(&self) -> Result<SyncStatus, L1ProviderError>;

    /// Returns the header at the provided number, or the latest header if `None`.
    async fn header_by_number(&self, number: Option<u64>)
        -> Result<Option<Header>, L1ProviderError>;

    /// Returns the transaction with the provided hash.
    async fn transaction_by_hash(&self, hash: B256)
        -> Result<Option<Transaction>, L1ProviderError>;
}
