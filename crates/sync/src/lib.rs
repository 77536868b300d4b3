//! L1 synchronization service for the rollup node.
//!
//! The service consumes L1 headers in order, fetches the canonical transaction chain logs emitted
//! since the last checkpoint, replays the enqueued transactions into the transaction pool once
//! they are appended to a batch and persists the checkpoint after every header.

mod cache;
pub use cache::TransactionCache;

mod error;
pub use error::SyncError;

mod handle;
pub use handle::{SyncCommand, SyncServiceHandle};

mod metrics;
pub use metrics::SyncServiceMetrics;

mod producer;
pub use producer::HeaderProducer;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;

use alloy_rpc_types_eth::{Filter, Log, SyncStatus};
use error::SyncResult;
use rollup_node_l1::CtcEvent;
use rollup_node_primitives::{BatchAppendDescriptor, BlockInfo, Eth1Checkpoint, SyncConfig};
use rollup_node_providers::{CheckpointStore, L1Client, LogFilterer, PoolError, TransactionPool};
use rollup_node_signer::IngestionSigner;
use std::time::Instant;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// The capacity of the header and completion channels. A single header is in flight at a time.
pub const HEADER_CHANNEL_CAPACITY: usize = 1;

/// The sync service replays the transactions enqueued on the L1 canonical transaction chain into
/// the L2 transaction pool.
///
/// The service is the single owner of the [`TransactionCache`] and of the [`Eth1Checkpoint`]. All
/// its state transitions happen in [`SyncService::process_header`], driven by [`SyncService::run`].
#[derive(Debug)]
pub struct SyncService<LF, P, CS> {
    /// The L1 log filterer. The client should implement some backoff strategy using
    /// `alloy_transport::layers::RetryBackoffLayer`.
    log_filterer: LF,
    /// The L2 transaction pool.
    pool: P,
    /// The durable checkpoint store.
    checkpoint_store: CS,
    /// The signer of the L2 transactions.
    signer: IngestionSigner,
    /// The service configuration.
    config: SyncConfig,
    /// The enqueued transactions waiting for a batch append.
    cache: TransactionCache,
    /// The last fully processed L1 block.
    checkpoint: Eth1Checkpoint,
    /// The receiver of L1 headers.
    heads_rx: mpsc::Receiver<BlockInfo>,
    /// The sender of processed header heights.
    done_tx: mpsc::Sender<u64>,
    /// The receiver of commands.
    command_rx: mpsc::UnboundedReceiver<SyncCommand>,
    /// The sender of checkpoint updates.
    checkpoint_tx: watch::Sender<Eth1Checkpoint>,
    /// The metrics for the service.
    metrics: SyncServiceMetrics,
}

impl<LF, P, CS> SyncService<LF, P, CS>
where
    LF: LogFilterer + 'static,
    P: TransactionPool + 'static,
    CS: CheckpointStore + 'static,
{
    /// Returns a new [`SyncService`] along with its [`SyncServiceHandle`].
    ///
    /// Validates the L1 node and loads the checkpoint from the store. When no checkpoint was
    /// persisted, the service starts at the contract deployment height.
    pub async fn new<L1: L1Client>(
        config: SyncConfig,
        log_filterer: LF,
        l1_client: &L1,
        pool: P,
        checkpoint_store: CS,
        signer: IngestionSigner,
    ) -> SyncResult<(Self, SyncServiceHandle)> {
        tracing::trace!(target: "rollup::sync", ?config, signer = ?signer.address(), "creating sync service");

        validate_l1(l1_client).await?;
        let checkpoint = match checkpoint_store.get().await? {
            Some(checkpoint) => {
                tracing::info!(target: "rollup::sync", %checkpoint, "loaded checkpoint from store");
                checkpoint
            }
            None => {
                let height = config.contract_deployment_height;
                let hash = l1_client
                    .header_by_number(Some(height))
                    .await?
                    .map(|header| header.hash)
                    .unwrap_or_default();
                let checkpoint = Eth1Checkpoint::new(height, hash);
                tracing::info!(target: "rollup::sync", %checkpoint, "no checkpoint in store, starting from contract deployment height");
                checkpoint
            }
        };

        let (heads_tx, heads_rx) = mpsc::channel(HEADER_CHANNEL_CAPACITY);
        let (done_tx, done_rx) = mpsc::channel(HEADER_CHANNEL_CAPACITY);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (checkpoint_tx, checkpoint_rx) = watch::channel(checkpoint);
        let cache = TransactionCache::default();

        let service = Self {
            log_filterer,
            pool,
            checkpoint_store,
            signer,
            config,
            cache: cache.clone(),
            checkpoint,
            heads_rx,
            done_tx,
            command_rx,
            checkpoint_tx,
            metrics: SyncServiceMetrics::default(),
        };
        let handle = SyncServiceHandle::new(heads_tx, done_rx, command_tx, checkpoint_rx, cache);

        Ok((service, handle))
    }

    /// Spawns a new [`SyncService`] onto the tokio runtime.
    pub async fn spawn<L1: L1Client>(
        config: SyncConfig,
        log_filterer: LF,
        l1_client: &L1,
        pool: P,
        checkpoint_store: CS,
        signer: IngestionSigner,
    ) -> SyncResult<(SyncServiceHandle, JoinHandle<SyncResult<()>>)> {
        let (service, handle) =
            Self::new(config, log_filterer, l1_client, pool, checkpoint_store, signer).await?;
        Ok((handle, tokio::spawn(service.run())))
    }

    /// Returns the last fully processed checkpoint.
    pub const fn checkpoint(&self) -> Eth1Checkpoint {
        self.checkpoint
    }

    /// Main execution loop for the [`SyncService`].
    ///
    /// Returns `Ok` when shut down or when all the header senders are dropped, and the fatal
    /// error otherwise. Transient faults are retried for the same header.
    pub async fn run(mut self) -> SyncResult<()> {
        loop {
            let header = tokio::select! {
                biased;

                Some(SyncCommand::Shutdown) = self.command_rx.recv() => {
                    tracing::info!(target: "rollup::sync", "received shutdown command, stopping the sync service");
                    break;
                }
                header = self.heads_rx.recv() => {
                    let Some(header) = header else {
                        tracing::info!(target: "rollup::sync", "header channel closed, stopping the sync service");
                        break;
                    };
                    header
                }
            };

            loop {
                match self.process_header(header).await {
                    Ok(()) => break,
                    Err(err) if err.is_retryable() => {
                        self.metrics.fetch_failures.increment(1);
                        tracing::warn!(target: "rollup::sync", ?err, number = header.number, "failed to process header, retrying");
                        tokio::select! {
                            biased;

                            Some(SyncCommand::Shutdown) = self.command_rx.recv() => {
                                tracing::info!(target: "rollup::sync", "received shutdown command while retrying, stopping the sync service");
                                return Ok(());
                            }
                            _ = tokio::time::sleep(self.config.fetch_retry_interval) => {}
                        }
                    }
                    Err(err) => {
                        tracing::error!(target: "rollup::sync", ?err, number = header.number, "fatal error processing header");
                        return Err(err);
                    }
                }
            }

            tokio::select! {
                biased;

                Some(SyncCommand::Shutdown) = self.command_rx.recv() => {
                    tracing::info!(target: "rollup::sync", "received shutdown command, stopping the sync service");
                    break;
                }
                res = self.done_tx.send(header.number) => {
                    if res.is_err() {
                        tracing::warn!(target: "rollup::sync", "completion channel closed, stopping the sync service");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Applies all the canonical transaction chain events emitted between the checkpoint and the
    /// header, then advances the checkpoint to the header.
    ///
    /// No state is modified if the logs cannot be fetched or decoded.
    #[tracing::instrument(target = "rollup::sync", skip_all, fields(number = header.number))]
    pub async fn process_header(&mut self, header: BlockInfo) -> SyncResult<()> {
        if header.number <= self.checkpoint.block_height {
            return Err(SyncError::NonMonotonicHeader {
                checkpoint: self.checkpoint.block_height,
                received: header.number,
            });
        }

        let logs = self.fetch_logs(self.checkpoint.next_height(), header.number).await?;
        let events = self.decode_logs(&logs)?;
        tracing::trace!(target: "rollup::sync", logs = logs.len(), events = events.len(), "fetched canonical transaction chain events");

        for event in events {
            match event {
                CtcEvent::TransactionEnqueued(tx) => {
                    tracing::debug!(target: "rollup::sync", queue_index = tx.queue_index, "transaction enqueued");
                    self.metrics.enqueued_transactions.increment(1);
                    self.cache.put(tx);
                }
                CtcEvent::QueueBatchAppended(batch) => {
                    self.metrics.batch_appends.increment(1);
                    self.handle_queue_batch_appended(batch).await?;
                }
                CtcEvent::Unknown => {}
            }
        }
        self.metrics.cache_size.set(self.cache.len() as f64);

        let checkpoint = Eth1Checkpoint::from(header);
        self.checkpoint_store.put(checkpoint).await?;
        self.checkpoint = checkpoint;
        self.checkpoint_tx.send_replace(checkpoint);
        self.metrics.headers_processed.increment(1);

        tracing::debug!(target: "rollup::sync", %checkpoint, "processed header");
        Ok(())
    }

    /// Builds, signs and submits the transactions of the batch in ascending queue index order.
    ///
    /// The whole range must be cached, any missing index aborts the batch before a transaction is
    /// submitted. Pool rejections are recorded and do not abort the rest of the batch. A message
    /// the pool already holds, as when a header is replayed after a restart, is skipped.
    async fn handle_queue_batch_appended(&mut self, batch: BatchAppendDescriptor) -> SyncResult<()> {
        let range = batch.queue_indices().ok_or(SyncError::InvalidBatchRange {
            start: batch.starting_queue_index,
            num_queue_elements: batch.num_queue_elements,
        })?;
        tracing::debug!(target: "rollup::sync", ?range, total_elements = batch.total_elements, "queue batch appended");

        if let Some(missing) = self.cache.first_missing(range.clone()) {
            return Err(SyncError::CacheMiss(missing));
        }

        let sender = self.signer.address();
        for queue_index in range {
            let tx = self.cache.take(queue_index).ok_or(SyncError::CacheMiss(queue_index))?;
            let nonce = self.pool.nonce(sender).await;
            let signed = self.signer.build_and_sign(&tx, nonce).await?;
            let hash = signed.hash();

            match self.pool.submit(signed).await {
                Ok(()) => {
                    self.metrics.submitted_transactions.increment(1);
                    tracing::debug!(target: "rollup::sync", queue_index, nonce, ?hash, "submitted transaction to pool");
                }
                Err(PoolError::AlreadyKnown(known)) => {
                    tracing::debug!(target: "rollup::sync", queue_index, ?known, "transaction already in pool, skipping");
                }
                Err(err) => {
                    self.metrics.submission_failures.increment(1);
                    tracing::warn!(target: "rollup::sync", ?err, queue_index, nonce, ?hash, "transaction pool rejected transaction");
                }
            }
        }

        Ok(())
    }

    /// Decodes the canonical transaction chain logs. Logs from other contracts, removed logs and
    /// logs at or below the checkpoint are skipped.
    fn decode_logs(&self, logs: &[Log]) -> SyncResult<Vec<CtcEvent>> {
        let checkpoint = self.checkpoint.block_height;
        logs.iter()
            .filter(|log| log.address() == self.config.contract_address && !log.removed)
            .filter(|log| {
                let stale = log.block_number.is_some_and(|number| number <= checkpoint);
                if stale {
                    tracing::warn!(target: "rollup::sync", block_number = ?log.block_number, checkpoint, "skipping log at or below checkpoint");
                }
                !stale
            })
            .map(|log| CtcEvent::try_decode(log).map_err(SyncError::from))
            .collect()
    }

    /// Fetches the logs of the contract in the inclusive range, split in windows of at most
    /// `log_query_block_range` blocks.
    async fn fetch_logs(&self, from: u64, to: u64) -> SyncResult<Vec<Log>> {
        let window = self.config.log_query_block_range.max(1);
        let mut logs = Vec::new();

        let mut start = from;
        while start <= to {
            let end = start.saturating_add(window - 1).min(to);
            let filter = Filter::new()
                .address(self.config.contract_address)
                .from_block(start)
                .to_block(end);
            tracing::trace!(target: "rollup::sync", ?filter, "fetching logs");

            let now = Instant::now();
            logs.extend(self.log_filterer.filter_logs(&filter).await?);
            self.metrics.log_fetch_duration.record(now.elapsed().as_secs_f64());

            if end == u64::MAX {
                break;
            }
            start = end + 1;
        }

        Ok(logs)
    }
}

/// Logs the identity and the sync status of the L1 node.
async fn validate_l1<L1: L1Client>(l1_client: &L1) -> SyncResult<()> {
    let chain_id = l1_client.chain_id().await?;
    let network_id = l1_client.network_id().await?;
    match l1_client.sync_progress().await? {
        SyncStatus::None => {
            tracing::info!(target: "rollup::sync", chain_id, network_id, "connected to L1 node");
        }
        SyncStatus::Info(info) => {
            tracing::warn!(target: "rollup::sync", chain_id, network_id, current_block = %info.current_block, highest_block = %info.highest_block, "L1 node is syncing");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        header, init_test_tracing, queue_batch_appended_log, transaction_enqueued_log,
        MockCheckpointStore, MockL1Client, MockLogFilterer,
    };

    use alloy_primitives::{address, bytes, Address, B256};
    use alloy_signer_local::PrivateKeySigner;
    use rollup_node_primitives::{RollupTransaction, SignedL2Transaction};
    use rollup_node_providers::InMemoryTransactionPool;
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    const CTC: Address = address!("E894780e35530557B152281e8828339303aE33e5");

    fn config() -> SyncConfig {
        SyncConfig::new(CTC, 0, 420).with_fetch_retry_interval(Duration::from_millis(1))
    }

    fn rollup_tx(queue_index: u64) -> RollupTransaction {
        RollupTransaction {
            queue_index,
            timestamp: 24,
            l1_origin: address!("EA674fdDe714fd979de3EdF0F56AA9716B898ec8"),
            target: address!("04668ec2f57cc15c381b461b9fedab5d451c8f7f"),
            gas_limit: 66 + queue_index,
            data: bytes!("0292"),
            l1_block_number: 1,
        }
    }

    /// A pool rejecting the first submitted transaction.
    #[derive(Debug, Default)]
    struct RejectFirstPool {
        inner: InMemoryTransactionPool,
        rejected: AtomicBool,
    }

    #[async_trait::async_trait]
    impl TransactionPool for RejectFirstPool {
        async fn submit(&self, tx: SignedL2Transaction) -> Result<(), PoolError> {
            if !self.rejected.swap(true, Ordering::SeqCst) {
                return Err(PoolError::NonceGap { expected: 0, got: tx.nonce() });
            }
            self.inner.submit(tx).await
        }

        async fn pending(&self) -> HashMap<Address, Vec<SignedL2Transaction>> {
            self.inner.pending().await
        }

        async fn nonce(&self, address: Address) -> u64 {
            self.inner.nonce(address).await
        }
    }

    async fn sync_service_with_pool<P: TransactionPool + 'static>(
        config: SyncConfig,
        log_filterer: MockLogFilterer,
        pool: P,
    ) -> eyre::Result<(SyncService<MockLogFilterer, P, MockCheckpointStore>, SyncServiceHandle)> {
        init_test_tracing();
        let signer = IngestionSigner::new(PrivateKeySigner::random(), config.l2_chain_id);
        Ok(SyncService::new(
            config,
            log_filterer,
            &MockL1Client::default(),
            pool,
            MockCheckpointStore::default(),
            signer,
        )
        .await?)
    }

    async fn sync_service(
        config: SyncConfig,
        log_filterer: MockLogFilterer,
    ) -> eyre::Result<(
        SyncService<MockLogFilterer, InMemoryTransactionPool, MockCheckpointStore>,
        SyncServiceHandle,
    )> {
        sync_service_with_pool(config, log_filterer, InMemoryTransactionPool::new()).await
    }

    #[tokio::test]
    async fn test_should_fetch_logs_in_windows() -> eyre::Result<()> {
        // Given
        let filterer = MockLogFilterer::default();
        let (mut service, _handle) =
            sync_service(config().with_log_query_block_range(4), filterer.clone()).await?;

        // When
        let head = header(10);
        service.process_header(head).await?;

        // Then
        let ranges: Vec<_> = filterer
            .filters()
            .into_iter()
            .map(|filter| (filter.get_from_block(), filter.get_to_block()))
            .collect();
        assert_eq!(
            ranges,
            vec![(Some(1), Some(4)), (Some(5), Some(8)), (Some(9), Some(10))]
        );
        assert_eq!(service.checkpoint(), Eth1Checkpoint::from(head));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_ignore_foreign_and_unknown_logs() -> eyre::Result<()> {
        // Given
        let foreign = transaction_enqueued_log(Address::random(), &rollup_tx(0));
        let mut unknown = transaction_enqueued_log(CTC, &rollup_tx(1));
        unknown.inner.data = alloy_primitives::LogData::new_unchecked(
            vec![B256::random()],
            unknown.inner.data.data.clone(),
        );
        let filterer = MockLogFilterer::new(vec![vec![foreign, unknown]]);
        let (mut service, handle) = sync_service(config(), filterer).await?;

        // When
        service.process_header(header(1)).await?;

        // Then
        assert!(handle.cache().is_empty());
        assert_eq!(service.checkpoint().block_height, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_skip_stale_and_removed_logs() -> eyre::Result<()> {
        // Given
        let stale =
            transaction_enqueued_log(CTC, &RollupTransaction { l1_block_number: 2, ..rollup_tx(0) });
        let mut removed =
            transaction_enqueued_log(CTC, &RollupTransaction { l1_block_number: 3, ..rollup_tx(1) });
        removed.removed = true;
        let valid =
            transaction_enqueued_log(CTC, &RollupTransaction { l1_block_number: 3, ..rollup_tx(2) });
        let filterer = MockLogFilterer::new(vec![vec![], vec![stale, removed, valid]]);
        let (mut service, handle) = sync_service(config(), filterer).await?;
        service.process_header(header(2)).await?;

        // When
        service.process_header(header(3)).await?;

        // Then
        let cache = handle.cache();
        assert_eq!(cache.len(), 1);
        assert!(cache.get(0).is_none());
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(2), Some(RollupTransaction { l1_block_number: 3, ..rollup_tx(2) }));
        assert_eq!(service.checkpoint().block_height, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_not_mutate_state_on_decode_failure() -> eyre::Result<()> {
        // Given
        let mut malformed = queue_batch_appended_log(CTC, 1, 0, 1, 1);
        malformed.inner.data = alloy_primitives::LogData::new_unchecked(
            malformed.inner.data.topics().to_vec(),
            bytes!("dead"),
        );
        let filterer =
            MockLogFilterer::new(vec![vec![transaction_enqueued_log(CTC, &rollup_tx(0)), malformed]]);
        let (mut service, handle) = sync_service(config(), filterer).await?;

        // When
        let err = service.process_header(header(1)).await.unwrap_err();

        // Then
        assert!(matches!(err, SyncError::Decode(_)));
        assert!(!err.is_retryable());
        assert!(handle.cache().is_empty());
        assert_eq!(service.checkpoint().block_height, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_abort_batch_on_shortfall() -> eyre::Result<()> {
        // Given
        let filterer = MockLogFilterer::new(vec![vec![
            transaction_enqueued_log(CTC, &rollup_tx(0)),
            transaction_enqueued_log(CTC, &rollup_tx(1)),
            queue_batch_appended_log(CTC, 1, 0, 3, 3),
        ]]);
        let (mut service, handle) = sync_service(config(), filterer).await?;

        // When
        let err = service.process_header(header(1)).await.unwrap_err();

        // Then
        assert!(matches!(err, SyncError::CacheMiss(2)));
        assert_eq!(handle.cache().len(), 2);
        assert!(service.pool.pending().await.is_empty());
        assert_eq!(service.checkpoint().block_height, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_continue_batch_on_pool_rejection() -> eyre::Result<()> {
        // Given
        let filterer = MockLogFilterer::new(vec![vec![
            transaction_enqueued_log(CTC, &rollup_tx(0)),
            transaction_enqueued_log(CTC, &rollup_tx(1)),
            queue_batch_appended_log(CTC, 1, 0, 2, 2),
        ]]);
        let (mut service, handle) =
            sync_service_with_pool(config(), filterer, RejectFirstPool::default()).await?;

        // When
        service.process_header(header(1)).await?;

        // Then
        let pending = service.pool.pending().await;
        let txs = &pending[&service.signer.address()];
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].nonce(), 0);
        assert_eq!(txs[0].tx.gas_limit, rollup_tx(1).gas_limit);
        assert!(handle.cache().is_empty());
        assert_eq!(service.checkpoint().block_height, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_non_monotonic_header() -> eyre::Result<()> {
        // Given
        let (mut service, _handle) = sync_service(config(), MockLogFilterer::default()).await?;
        service.process_header(header(2)).await?;

        // When
        let duplicate = service.process_header(header(2)).await.unwrap_err();
        let older = service.process_header(header(1)).await.unwrap_err();

        // Then
        assert!(matches!(duplicate, SyncError::NonMonotonicHeader { checkpoint: 2, received: 2 }));
        assert!(matches!(older, SyncError::NonMonotonicHeader { checkpoint: 2, received: 1 }));
        assert_eq!(service.checkpoint().block_height, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_not_advance_checkpoint_on_persist_failure() -> eyre::Result<()> {
        // Given
        let (mut service, handle) = sync_service(config(), MockLogFilterer::default()).await?;
        service.checkpoint_store.fail_puts(true);

        // When
        let err = service.process_header(header(1)).await.unwrap_err();

        // Then
        assert!(matches!(err, SyncError::CheckpointStore(_)));
        assert_eq!(service.checkpoint().block_height, 0);
        assert_eq!(handle.checkpoint().block_height, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_start_from_stored_checkpoint() -> eyre::Result<()> {
        init_test_tracing();
        let stored = Eth1Checkpoint::new(12, B256::random());
        let store = MockCheckpointStore::default();
        store.put(stored).await?;

        let (service, handle) = SyncService::new(
            config(),
            MockLogFilterer::default(),
            &MockL1Client::default(),
            InMemoryTransactionPool::new(),
            store,
            IngestionSigner::new(PrivateKeySigner::random(), 420),
        )
        .await?;

        assert_eq!(service.checkpoint(), stored);
        assert_eq!(handle.checkpoint(), stored);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_start_from_deployment_height() -> eyre::Result<()> {
        init_test_tracing();
        let deployment = header(7);
        let l1_client = MockL1Client::default().with_headers(vec![deployment]);
        let config = SyncConfig::new(CTC, 7, 420);

        let (service, _) = SyncService::new(
            config,
            MockLogFilterer::default(),
            &l1_client,
            InMemoryTransactionPool::new(),
            MockCheckpointStore::default(),
            IngestionSigner::new(PrivateKeySigner::random(), 420),
        )
        .await?;
        assert_eq!(service.checkpoint(), Eth1Checkpoint::from(deployment));

        // unknown deployment header falls back to the zero hash.
        let (service, _) = SyncService::new(
            SyncConfig::new(CTC, 9, 420),
            MockLogFilterer::default(),
            &l1_client,
            InMemoryTransactionPool::new(),
            MockCheckpointStore::default(),
            IngestionSigner::new(PrivateKeySigner::random(), 420),
        )
        .await?;
        assert_eq!(service.checkpoint(), Eth1Checkpoint::new(9, B256::ZERO));

        Ok(())
    }
}
