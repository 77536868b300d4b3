use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::IngestionSigner`].
#[derive(Metrics, Clone)]
#[metrics(scope = "signer")]
pub struct SignerMetrics {
    /// The signing duration.
    pub signing_duration: Histogram,
    /// The number of signed transactions.
    pub signed_transactions: Counter,
}
