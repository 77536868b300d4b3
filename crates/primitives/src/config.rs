use alloy_primitives::Address;
use std::time::Duration;

/// The default maximum L1 block span of a single log query.
pub const DEFAULT_LOG_QUERY_BLOCK_RANGE: u64 = 1_000;

/// The default delay before a failed log fetch is retried for the same header.
pub const DEFAULT_FETCH_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// The configuration of the L1 synchronization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// The address of the canonical transaction chain contract on L1.
    pub contract_address: Address,
    /// The L1 height at which the canonical transaction chain was deployed. Used as the starting
    /// checkpoint when none was persisted.
    pub contract_deployment_height: u64,
    /// The chain id used when signing L2 transactions.
    pub l2_chain_id: u64,
    /// The maximum L1 block span of a single log query. Larger ranges are split into windows.
    pub log_query_block_range: u64,
    /// The delay before retrying a header after a transient fetch failure.
    pub fetch_retry_interval: Duration,
}

impl SyncConfig {
    /// Returns a new [`SyncConfig`] with default query range and retry interval.
    pub const fn new(
        contract_address: Address,
        contract_deployment_height: u64,
        l2_chain_id: u64,
    ) -> Self {
        Self {
            contract_address,
            contract_deployment_height,
            l2_chain_id,
            log_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            fetch_retry_interval: DEFAULT_FETCH_RETRY_INTERVAL,
        }
    }

    /// Sets the maximum L1 block span of a single log query. A zero range is bumped to one.
    pub const fn with_log_query_block_range(mut self, range: u64) -> Self {
        self.log_query_block_range = if range == 0 { 1 } else { range };
        self
    }

    /// Sets the delay before retrying a header after a transient fetch failure.
    pub const fn with_fetch_retry_interval(mut self, interval: Duration) -> Self {
        self.fetch_retry_interval = interval;
        self
    }
}
