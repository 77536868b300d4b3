use crate::constants;
use std::{fs, path::PathBuf, time::Duration};

use alloy_primitives::{hex, Address};
use alloy_signer_local::PrivateKeySigner;
use rollup_node_primitives::{SyncConfig, DEFAULT_LOG_QUERY_BLOCK_RANGE};

/// The arguments for the rollup node.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "rollup-node", about = "Ingests canonical transaction chain events from L1")]
pub struct RollupNodeArgs {
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1_provider_args: L1ProviderArgs,
    /// The canonical transaction chain arguments.
    #[command(flatten)]
    pub ctc_args: CtcArgs,
    /// The L2 arguments.
    #[command(flatten)]
    pub l2_args: L2Args,
    /// The signer arguments.
    #[command(flatten)]
    pub signer_args: SignerArgs,
    /// The database arguments.
    #[command(flatten)]
    pub database_args: DatabaseArgs,
}

impl RollupNodeArgs {
    /// Validate that exactly one ingestion key source is provided.
    pub fn validate(&self) -> Result<(), String> {
        match (&self.signer_args.key_file, &self.signer_args.private_key) {
            (None, None) => {
                Err("Either signer key file or private key is required".to_string())
            }
            (Some(_), Some(_)) => Err("Cannot specify more than one signer key source".to_string()),
            _ => Ok(()),
        }
    }

    /// Returns the [`SyncConfig`] described by the arguments.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(
            self.ctc_args.address,
            self.ctc_args.deployment_height,
            self.l2_args.chain_id,
        )
        .with_log_query_block_range(self.l1_provider_args.logs_query_block_range)
    }
}

/// The arguments for the L1 provider.
#[derive(Debug, Clone, clap::Args)]
pub struct L1ProviderArgs {
    /// The URL for the L1 RPC.
    #[arg(long = "l1.url", id = "l1_url", value_name = "L1_URL", env = "ROLLUP_NODE_L1_URL")]
    pub url: reqwest::Url,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = constants::L1_PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = constants::L1_PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
    /// The logs query block range.
    #[arg(long = "l1.query-range", id = "l1_query_range", value_name = "L1_QUERY_RANGE", default_value_t = DEFAULT_LOG_QUERY_BLOCK_RANGE)]
    pub logs_query_block_range: u64,
    /// The interval in milliseconds at which the L1 head is polled.
    #[arg(long = "l1.poll-interval", id = "l1_poll_interval", value_name = "L1_POLL_INTERVAL", default_value_t = constants::L1_POLL_INTERVAL)]
    pub poll_interval: u64,
}

impl L1ProviderArgs {
    /// Returns the L1 head poll interval.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }
}

/// The arguments for the canonical transaction chain contract.
#[derive(Debug, Clone, clap::Args)]
pub struct CtcArgs {
    /// The address of the canonical transaction chain contract on L1.
    #[arg(long = "ctc.address", value_name = "ADDRESS", env = "ROLLUP_NODE_CTC_ADDRESS")]
    pub address: Address,
    /// The L1 block at which the contract was deployed.
    #[arg(long = "ctc.deployment-height", value_name = "BLOCK_NUMBER", default_value_t = 0)]
    pub deployment_height: u64,
}

/// The L2 arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct L2Args {
    /// The chain id of the L2.
    #[arg(long = "l2.chain-id", value_name = "CHAIN_ID", env = "ROLLUP_NODE_L2_CHAIN_ID")]
    pub chain_id: u64,
}

/// The arguments for the signer.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct SignerArgs {
    /// Path to the file containing the ingestion private key
    #[arg(
        long = "signer.key-file",
        value_name = "FILE_PATH",
        help = "Path to the hex-encoded ingestion private key file (optional 0x prefix). Mutually exclusive with --signer.private-key"
    )]
    pub key_file: Option<PathBuf>,

    /// The hex-encoded ingestion private key.
    #[arg(
        long = "signer.private-key",
        value_name = "PRIVATE_KEY",
        env = "ROLLUP_NODE_SIGNER_PRIVATE_KEY",
        hide_env_values = true
    )]
    pub private_key: Option<PrivateKeySigner>,
}

impl SignerArgs {
    /// Loads the ingestion key from the configured source.
    pub fn signer(&self) -> eyre::Result<PrivateKeySigner> {
        let signer = if let Some(key_file_path) = &self.key_file {
            let key_content = fs::read_to_string(key_file_path)
                .map_err(|e| {
                    eyre::eyre!("Failed to read signer key file {}: {}", key_file_path.display(), e)
                })?
                .trim()
                .to_string();

            let hex_str = key_content.strip_prefix("0x").unwrap_or(&key_content);
            let key_bytes = hex::decode(hex_str).map_err(|e| {
                eyre::eyre!(
                    "Failed to decode hex private key from file {}: {}",
                    key_file_path.display(),
                    e
                )
            })?;

            PrivateKeySigner::from_slice(&key_bytes)
                .map_err(|e| eyre::eyre!("Failed to create signer from key file: {}", e))?
        } else if let Some(private_key) = &self.private_key {
            private_key.clone()
        } else {
            eyre::bail!("No ingestion key configured")
        };

        tracing::info!(target: "rollup::node", address = ?signer.address(), "Loaded ingestion key");
        Ok(signer)
    }
}

/// The database arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    /// Database path
    #[arg(
        long = "db.path",
        value_name = "DB_PATH",
        default_value = constants::DEFAULT_DB_PATH,
        help = "The path of the sqlite database holding the sync checkpoint"
    )]
    pub path: PathBuf,
}

impl DatabaseArgs {
    /// Returns the sqlite connection url of the database, creating the file if missing.
    pub fn url(&self) -> String {
        // build the url from strings as `join(...)` overwrites "sqlite://" if the path is
        // absolute.
        "sqlite://".to_string() + &*self.path.to_string_lossy() + "?mode=rwc"
    }
}
