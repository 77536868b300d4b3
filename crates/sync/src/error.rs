use rollup_node_l1::CtcLogError;
use rollup_node_providers::{CheckpointStoreError, L1ProviderError};
use rollup_node_signer::SignerError;

/// A [`Result`] that uses [`SyncError`] as the error type.
pub(crate) type SyncResult<T> = Result<T, SyncError>;

/// An error that occurred in the sync service.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// An error with the L1 provider. Transient, the header can be retried.
    #[error("l1 provider error: {0}")]
    L1Provider(#[from] L1ProviderError),
    /// A canonical transaction chain log could not be decoded.
    #[error(transparent)]
    Decode(#[from] CtcLogError),
    /// A queue batch append referenced a queue index which is not in the cache.
    #[error("missing transaction at queue index {0} in cache")]
    CacheMiss(u64),
    /// A queue batch append declared a range which overflows.
    #[error("invalid queue batch range: start {start}, elements {num_queue_elements}")]
    InvalidBatchRange {
        /// The first queue index of the batch.
        start: u64,
        /// The number of elements in the batch.
        num_queue_elements: u64,
    },
    /// A header was received at or below the checkpoint.
    #[error("non monotonic header {received}, checkpoint at {checkpoint}")]
    NonMonotonicHeader {
        /// The current checkpoint height.
        checkpoint: u64,
        /// The height of the received header.
        received: u64,
    },
    /// The checkpoint could not be loaded or persisted.
    #[error("checkpoint store error: {0}")]
    CheckpointStore(#[from] CheckpointStoreError),
    /// A transaction could not be signed.
    #[error(transparent)]
    Signer(#[from] SignerError),
    /// The sync service has stopped.
    #[error("sync service stopped")]
    ServiceStopped,
}

impl SyncError {
    /// Returns true if the error is a transient fault and the header can safely be reprocessed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::L1Provider(_))
    }
}
