//! Primitive types for the rollup node L1 synchronization core.

pub use batch::BatchAppendDescriptor;
mod batch;

pub use block::{BlockInfo, Eth1Checkpoint};
mod block;

pub use config::{SyncConfig, DEFAULT_FETCH_RETRY_INTERVAL, DEFAULT_LOG_QUERY_BLOCK_RANGE};
mod config;

pub use transaction::{
    L2Transaction, QueueOrigin, RollupTransaction, SignatureHashType, SignedL2Transaction,
};
mod transaction;
