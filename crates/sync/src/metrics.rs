use metrics::{Counter, Gauge, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::SyncService`].
#[derive(Metrics, Clone)]
#[metrics(scope = "sync_service")]
pub struct SyncServiceMetrics {
    /// A counter on the L1 headers processed.
    pub headers_processed: Counter,
    /// A counter on the `TransactionEnqueued` events processed.
    pub enqueued_transactions: Counter,
    /// A counter on the `QueueBatchAppended` events processed.
    pub batch_appends: Counter,
    /// A counter on the transactions admitted by the pool.
    pub submitted_transactions: Counter,
    /// A counter on the transactions rejected by the pool.
    pub submission_failures: Counter,
    /// A counter on the failed log fetches.
    pub fetch_failures: Counter,
    /// The number of transactions waiting in the cache.
    pub cache_size: Gauge,
    /// The duration of a log fetch.
    pub log_fetch_duration: Histogram,
}
