use alloy_primitives::B256;
use alloy_rpc_types_eth::{Header, SyncStatus, Transaction};
use rollup_node_primitives::BlockInfo;
use rollup_node_providers::{L1Client, L1ProviderError};
use std::{collections::BTreeMap, sync::Arc};

use parking_lot::Mutex;

/// A mock implementation of the [`L1Client`] trait.
#[derive(Debug, Clone)]
pub struct MockL1Client {
    chain_id: u64,
    network_id: u64,
    headers: Arc<Mutex<BTreeMap<u64, Header>>>,
    transactions: Arc<Mutex<BTreeMap<B256, Transaction>>>,
}

impl Default for MockL1Client {
    fn default() -> Self {
        Self {
            chain_id: 1,
            network_id: 1,
            headers: Default::default(),
            transactions: Default::default(),
        }
    }
}

impl MockL1Client {
    /// Returns the client with the provided headers available.
    pub fn with_headers(self, headers: impl IntoIterator<Item = BlockInfo>) -> Self {
        self.push_headers(headers);
        self
    }

    /// Returns the client with the provided transactions available.
    pub fn with_transactions(self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        self.transactions
            .lock()
            .extend(transactions.into_iter().map(|tx| (*tx.inner.tx_hash(), tx)));
        self
    }

    /// Makes the headers available, the highest one becoming the latest header.
    pub fn push_headers(&self, headers: impl IntoIterator<Item = BlockInfo>) {
        let mut stored = self.headers.lock();
        for info in headers {
            let header = Header {
                hash: info.hash,
                inner: alloy_consensus::Header { number: info.number, ..Default::default() },
                ..Default::default()
            };
            stored.insert(info.number, header);
        }
    }
}

#[async_trait::async_trait]
impl L1Client for MockL1Client {
    async fn chain_id(&self) -> Result<u64, L1ProviderError> {
        Ok(self.chain_id)
    }

    async fn network_id(&self) -> Result<u64, L1ProviderError> {
        Ok(self.network_id)
    }

    async fn sync_progress(&self) -> Result<SyncStatus, L1ProviderError> {
        Ok(SyncStatus::None)
    }

    async fn header_by_number(
        &self,
        number: Option<u64>,
    ) -> Result<Option<Header>, L1ProviderError> {
        let headers = self.headers.lock();
        Ok(match number {
            Some(number) => headers.get(&number).cloned(),
            None => headers.last_key_value().map(|(_, header)| header.clone()),
        })
    }

    async fn transaction_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<Transaction>, L1ProviderError> {
        Ok(self.transactions.lock().get(&hash).cloned())
    }
}
