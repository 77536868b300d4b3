//! The crate exposes the collaborators of the L1 synchronization service along with their
//! implementations for usage across the rollup node.

pub use checkpoint::{CheckpointStore, InMemoryCheckpointStore};
mod checkpoint;

pub use error::{CheckpointStoreError, L1ProviderError, PoolError};
mod error;

pub use l1::{AlloyL1Provider, L1Client, LogFilterer};
mod l1;

pub use pool::{InMemoryTransactionPool, TransactionPool};
mod pool;

pub use alloy_rpc_types_eth::SyncStatus;
