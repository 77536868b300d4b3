//! Command handle for the sync service.

mod command;

pub use command::SyncCommand;

use crate::{SyncError, TransactionCache};
use rollup_node_primitives::{BlockInfo, Eth1Checkpoint};
use tokio::sync::{mpsc, mpsc::UnboundedSender, watch};

/// Handle to interact with the sync service.
#[derive(Debug)]
pub struct SyncServiceHandle {
    /// The sender of L1 headers to process.
    heads_tx: mpsc::Sender<BlockInfo>,
    /// The receiver of the processed header heights.
    done_rx: mpsc::Receiver<u64>,
    /// The sender of commands to the service.
    to_service_tx: UnboundedSender<SyncCommand>,
    /// The receiver of the current checkpoint.
    checkpoint_rx: watch::Receiver<Eth1Checkpoint>,
    /// The transaction cache of the service.
    cache: TransactionCache,
}

impl SyncServiceHandle {
    /// Create a new handle.
    pub const fn new(
        heads_tx: mpsc::Sender<BlockInfo>,
        done_rx: mpsc::Receiver<u64>,
        to_service_tx: UnboundedSender<SyncCommand>,
        checkpoint_rx: watch::Receiver<Eth1Checkpoint>,
        cache: TransactionCache,
    ) -> Self {
        Self { heads_tx, done_rx, to_service_tx, checkpoint_rx, cache }
    }

    /// Sends the header to the service, waiting until the previous header has been picked up.
    pub async fn send_header(&self, header: BlockInfo) -> Result<(), SyncError> {
        self.heads_tx.send(header).await.map_err(|_| SyncError::ServiceStopped)
    }

    /// Waits for the height of the next processed header. Returns `None` once the service stopped.
    pub async fn next_processed(&mut self) -> Option<u64> {
        self.done_rx.recv().await
    }

    /// Sends the header to the service and waits for it to be processed.
    pub async fn process(&mut self, header: BlockInfo) -> Result<u64, SyncError> {
        self.send_header(header).await?;
        self.next_processed().await.ok_or(SyncError::ServiceStopped)
    }

    /// Returns a sender of headers to the service, used to attach a header producer.
    pub fn header_sender(&self) -> mpsc::Sender<BlockInfo> {
        self.heads_tx.clone()
    }

    /// Returns the last processed checkpoint.
    pub fn checkpoint(&self) -> Eth1Checkpoint {
        *self.checkpoint_rx.borrow()
    }

    /// Returns a receiver of the checkpoint updates.
    pub fn checkpoint_receiver(&self) -> watch::Receiver<Eth1Checkpoint> {
        self.checkpoint_rx.clone()
    }

    /// Returns the transaction cache of the service. The cache must only be inspected, the
    /// service is its single writer.
    pub const fn cache(&self) -> &TransactionCache {
        &self.cache
    }

    /// Requests the service to stop.
    pub fn shutdown(&self) {
        self.send_command(SyncCommand::Shutdown);
    }

    /// Send a command to the service without waiting for a response.
    fn send_command(&self, command: SyncCommand) {
        if let Err(err) = self.to_service_tx.send(command) {
            tracing::error!(target: "rollup::sync", ?err, "Failed to send command to sync service");
        }
    }
}
