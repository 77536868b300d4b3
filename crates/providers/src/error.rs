use alloy_primitives::{SignatureError, B256};
use alloy_transport::TransportError;
use rollup_node_db::DatabaseError;

/// An error occurring at the L1 provider.
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// An error at the transport layer.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// The L1 node responded with an unexpected value.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// An error returned by the transaction pool when admitting a transaction.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The transaction is already known to the pool.
    #[error("transaction {0} already known")]
    AlreadyKnown(B256),
    /// The nonce of the transaction is lower than the next nonce of the sender.
    #[error("nonce too low: expected {expected}, got {got}")]
    NonceTooLow {
        /// The next nonce of the sender.
        expected: u64,
        /// The nonce of the transaction.
        got: u64,
    },
    /// The nonce of the transaction is higher than the next nonce of the sender.
    #[error("nonce gap: expected {expected}, got {got}")]
    NonceGap {
        /// The next nonce of the sender.
        expected: u64,
        /// The nonce of the transaction.
        got: u64,
    },
    /// The sender of the transaction could not be recovered.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
}

/// An error occurring at the checkpoint store.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointStoreError {
    /// An error at the database.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    /// The checkpoint store is unavailable.
    #[error("checkpoint store unavailable: {0}")]
    Unavailable(String),
}
