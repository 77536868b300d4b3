use crate::args::{L1ProviderArgs, RollupNodeArgs};
use std::sync::Arc;

use alloy_provider::ProviderBuilder;
use alloy_rpc_client::RpcClient;
use alloy_transport::layers::RetryBackoffLayer;
use rollup_node_db::{Database, DatabaseConnectionProvider};
use rollup_node_migration::{Migrator, MigratorTrait};
use rollup_node_providers::{AlloyL1Provider, InMemoryTransactionPool};
use rollup_node_signer::IngestionSigner;
use rollup_node_sync::{HeaderProducer, SyncError, SyncService, SyncServiceHandle};
use tokio::task::JoinHandle;

/// A running rollup node: the sync service, the header producer feeding it and the pool receiving
/// its transactions.
#[derive(Debug)]
pub struct RollupNode {
    handle: SyncServiceHandle,
    service: JoinHandle<Result<(), SyncError>>,
    producer: JoinHandle<()>,
    pool: InMemoryTransactionPool,
}

impl RollupNodeArgs {
    /// Consumes the [`RollupNodeArgs`] and launches a [`RollupNode`].
    pub async fn build(self) -> eyre::Result<RollupNode> {
        self.validate().map_err(|e| eyre::eyre!(e))?;
        let config = self.sync_config();
        tracing::info!(target: "rollup::node", ?config, "Building rollup node");

        // Load the ingestion key.
        let signer = IngestionSigner::new(self.signer_args.signer()?, config.l2_chain_id);

        // Instantiate the database and apply the migrations.
        let db = Database::new(&self.database_args.url()).await?;
        Migrator::up(db.get_connection(), None).await?;

        // Get a retry provider to the L1.
        let L1ProviderArgs { max_retries, initial_backoff, compute_units_per_second, .. } =
            self.l1_provider_args;
        let client = RpcClient::builder()
            .layer(RetryBackoffLayer::new(max_retries, initial_backoff, compute_units_per_second))
            .http(self.l1_provider_args.url.clone());
        let l1_provider =
            Arc::new(AlloyL1Provider::new(ProviderBuilder::new().connect_client(client)));

        let pool = InMemoryTransactionPool::new();
        let (handle, service) =
            SyncService::spawn(config, l1_provider.clone(), &l1_provider, pool.clone(), db, signer)
                .await?;

        let start = handle.checkpoint().next_height();
        tracing::info!(target: "rollup::node", checkpoint = %handle.checkpoint(), start, "Starting header producer");
        let producer = HeaderProducer::new(
            l1_provider,
            handle.header_sender(),
            start,
            self.l1_provider_args.poll_interval(),
        )
        .spawn();

        Ok(RollupNode { handle, service, producer, pool })
    }
}

impl RollupNode {
    /// Returns the handle to the sync service.
    pub const fn handle(&self) -> &SyncServiceHandle {
        &self.handle
    }

    /// Runs the node until ctrl-c is received or the sync service stops.
    pub async fn run(mut self) -> eyre::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                biased;

                res = &mut ctrl_c => {
                    res?;
                    tracing::info!(target: "rollup::node", "Received ctrl-c, shutting down");
                    self.handle.shutdown();
                    break;
                }
                processed = self.handle.next_processed() => match processed {
                    Some(number) => {
                        tracing::info!(
                            target: "rollup::node",
                            number,
                            checkpoint = %self.handle.checkpoint(),
                            pending = self.pool.len(),
                            "Processed L1 header"
                        );
                    }
                    None => break,
                },
            }
        }

        self.producer.abort();
        let res = self.service.await?;
        if let Err(err) = &res {
            tracing::error!(target: "rollup::node", ?err, "Sync service stopped with an error");
        }
        Ok(res?)
    }
}
