use crate::SyncError;

use rollup_node_primitives::BlockInfo;
use rollup_node_providers::L1Client;
use std::time::Duration;
use tokio::sync::mpsc;

/// The header producer feeds the sync service with the L1 headers, in strictly ascending order.
///
/// It polls the latest header of the L1 node and sends every header from `next` up to it,
/// blocking while the service processes the previous header.
#[derive(Debug)]
pub struct HeaderProducer<L1> {
    /// The L1 client.
    l1_client: L1,
    /// The sender of headers to the sync service.
    heads_tx: mpsc::Sender<BlockInfo>,
    /// The number of the next header to send.
    next: u64,
    /// The interval between two polls of the latest header.
    poll_interval: Duration,
}

impl<L1: L1Client + 'static> HeaderProducer<L1> {
    /// Returns a new [`HeaderProducer`], starting at the header `next`.
    pub const fn new(
        l1_client: L1,
        heads_tx: mpsc::Sender<BlockInfo>,
        next: u64,
        poll_interval: Duration,
    ) -> Self {
        Self { l1_client, heads_tx, next, poll_interval }
    }

    /// Spawns the producer onto the tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Main execution loop for the [`HeaderProducer`]. Returns once the sync service stops
    /// receiving headers.
    pub async fn run(mut self) {
        loop {
            if let Err(err) = self.step().await {
                tracing::info!(target: "rollup::sync", ?err, "header channel closed, stopping the header producer");
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Sends all the headers from `next` up to the latest header of the L1 node.
    pub async fn step(&mut self) -> Result<(), SyncError> {
        if self.heads_tx.is_closed() {
            return Err(SyncError::ServiceStopped);
        }

        let latest = match self.l1_client.header_by_number(None).await {
            Ok(Some(latest)) => latest.number,
            Ok(None) => return Ok(()),
            Err(err) => {
                tracing::warn!(target: "rollup::sync", ?err, "failed to fetch latest L1 header");
                return Ok(());
            }
        };

        while self.next <= latest {
            let header = match self.l1_client.header_by_number(Some(self.next)).await {
                Ok(Some(header)) => BlockInfo::from(header),
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(target: "rollup::sync", ?err, number = self.next, "failed to fetch L1 header");
                    break;
                }
            };
            tracing::trace!(target: "rollup::sync", %header, "sending header");
            self.heads_tx.send(header).await.map_err(|_| SyncError::ServiceStopped)?;
            self.next += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{header, MockL1Client};

    #[tokio::test]
    async fn test_should_send_headers_in_order() -> eyre::Result<()> {
        // Given
        let headers: Vec<_> = (0..6).map(header).collect();
        let l1_client = MockL1Client::default().with_headers(headers.clone());
        let (tx, mut rx) = mpsc::channel(10);
        let mut producer = HeaderProducer::new(l1_client.clone(), tx, 2, Duration::from_millis(1));

        // When
        producer.step().await?;

        // Then
        for expected in &headers[2..] {
            assert_eq!(rx.recv().await, Some(*expected));
        }
        assert!(rx.try_recv().is_err());

        // new headers are picked up on the next step.
        let new = header(6);
        l1_client.push_headers([new]);
        producer.step().await?;
        assert_eq!(rx.recv().await, Some(new));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_stop_when_channel_closed() {
        let l1_client = MockL1Client::default().with_headers((0..3).map(header));
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let producer = HeaderProducer::new(l1_client, tx, 0, Duration::from_millis(1));
        producer.spawn().await.unwrap();
    }
}
