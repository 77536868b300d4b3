use crate::PoolError;

use alloy_primitives::{Address, B256};
use parking_lot::Mutex;
use rollup_node_primitives::SignedL2Transaction;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// The pool receiving the signed L2 transactions.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc)]
pub trait TransactionPool: Send + Sync {
    /// Submits the transaction to the pool for admission.
    async fn submit(&self, tx: SignedL2Transaction) -> Result<(), PoolError>;

    /// Returns the pending transactions grouped by sender, ordered by nonce.
    async fn pending(&self) -> HashMap<Address, Vec<SignedL2Transaction>>;

    /// Returns the next nonce of the provided account.
    async fn nonce(&self, address: Address) -> u64;
}

/// An in-memory [`TransactionPool`] which admits transactions in strict nonce order.
///
/// An L1 to L2 transaction is identified by its sender and L1 queue index: a second transaction
/// for the same message is rejected as already known, whatever its nonce. Clones share the same
/// underlying pool.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionPool {
    inner: Arc<Mutex<PoolInner>>,
}

#[derive(Debug, Default)]
struct PoolInner {
    pending: HashMap<Address, Vec<SignedL2Transaction>>,
    known: HashSet<B256>,
    l1_messages: HashMap<(Address, u64), B256>,
}

impl InMemoryTransactionPool {
    /// Returns a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of pending transactions.
    pub fn len(&self) -> usize {
        self.inner.lock().known.len()
    }

    /// Returns true if the pool holds no transaction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl TransactionPool for InMemoryTransactionPool {
    async fn submit(&self, tx: SignedL2Transaction) -> Result<(), PoolError> {
        let sender = tx.recover_signer()?;
        let mut inner = self.inner.lock();

        if inner.known.contains(&tx.hash()) {
            return Err(PoolError::AlreadyKnown(tx.hash()));
        }
        if let Some(queue_index) = tx.tx.l1_queue_index {
            if let Some(known) = inner.l1_messages.get(&(sender, queue_index)) {
                return Err(PoolError::AlreadyKnown(*known));
            }
        }

        let expected = inner.pending.get(&sender).map(|txs| txs.len() as u64).unwrap_or_default();
        let got = tx.nonce();
        if got < expected {
            return Err(PoolError::NonceTooLow { expected, got });
        }
        if got > expected {
            return Err(PoolError::NonceGap { expected, got });
        }

        tracing::trace!(target: "rollup::providers", hash = ?tx.hash(), ?sender, nonce = got, "Admitted transaction");
        inner.known.insert(tx.hash());
        if let Some(queue_index) = tx.tx.l1_queue_index {
            inner.l1_messages.insert((sender, queue_index), tx.hash());
        }
        inner.pending.entry(sender).or_default().push(tx);
        Ok(())
    }

    async fn pending(&self) -> HashMap<Address, Vec<SignedL2Transaction>> {
        self.inner.lock().pending.clone()
    }

    async fn nonce(&self, address: Address) -> u64 {
        self.inner.lock().pending.get(&address).map(|txs| txs.len() as u64).unwrap_or_default()
    }
}
