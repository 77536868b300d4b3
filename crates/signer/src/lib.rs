//! A library responsible for building and signing the L2 transactions derived from L1 messages.
//!
//! The signer is generic and can use any implementation of the `Signer` trait from the
//! `alloy_signer` crate, including local and remote signers such as AWS KMS. All the transactions
//! it produces originate from the single address of the ingestion key, which lets consumers tell
//! L1 originated transactions apart from L2 native ones.

use alloy_primitives::{Address, Signature};
use rollup_node_primitives::{L2Transaction, RollupTransaction, SignedL2Transaction};
use std::{sync::Arc, time::Instant};

mod error;
pub use error::SignerError;

mod metrics;
pub use metrics::SignerMetrics;

/// The signer of the L2 transactions replayed from the canonical transaction chain.
#[derive(Clone)]
pub struct IngestionSigner {
    /// The signer instance.
    signer: Arc<dyn alloy_signer::Signer<Signature> + Send + Sync>,
    /// The chain id of the L2.
    chain_id: u64,
    /// The signer metrics.
    metrics: SignerMetrics,
}

impl IngestionSigner {
    /// Creates a new [`IngestionSigner`] with the provided signer and L2 chain id.
    pub fn new(
        signer: impl alloy_signer::Signer<Signature> + Send + Sync + 'static,
        chain_id: u64,
    ) -> Self {
        Self { signer: Arc::new(signer), chain_id, metrics: SignerMetrics::default() }
    }

    /// Returns the address of the ingestion key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Returns the L2 chain id.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Builds the unsigned L2 transaction for the enqueued message.
    pub fn build(&self, tx: &RollupTransaction, nonce: u64) -> L2Transaction {
        tx.to_transaction(nonce, self.chain_id)
    }

    /// Signs the transaction with the ingestion key.
    pub async fn sign(&self, tx: L2Transaction) -> Result<SignedL2Transaction, SignerError> {
        let now = Instant::now();
        let signature = self.signer.sign_hash(&tx.signature_hash()).await?;
        self.metrics.signing_duration.record(now.elapsed().as_secs_f64());
        self.metrics.signed_transactions.increment(1);

        let signed = tx.into_signed(signature);
        tracing::trace!(target: "rollup::signer", hash = ?signed.hash(), nonce = signed.nonce(), "Signed transaction");
        Ok(signed)
    }

    /// Builds and signs the L2 transaction for the enqueued message.
    pub async fn build_and_sign(
        &self,
        tx: &RollupTransaction,
        nonce: u64,
    ) -> Result<SignedL2Transaction, SignerError> {
        self.sign(self.build(tx, nonce)).await
    }
}

impl std::fmt::Debug for IngestionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionSigner")
            .field("signer", &"alloy_signer::Signer")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
