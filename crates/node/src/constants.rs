/// The max retries for the L1 provider.
pub(crate) const L1_PROVIDER_MAX_RETRIES: u32 = 10;

/// The initial backoff for the L1 provider.
pub(crate) const L1_PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The default provider compute units per second.
pub(crate) const PROVIDER_COMPUTE_UNITS_PER_SECOND: u64 = 10000;

/// The default interval in milliseconds at which the L1 head is polled.
pub(crate) const L1_POLL_INTERVAL: u64 = 2000;

/// The default database path.
pub(crate) const DEFAULT_DB_PATH: &str = "rollup-node.db";
