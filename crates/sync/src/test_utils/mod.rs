use crate::random;
use alloy_primitives::{Address, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use rollup_node_l1::{QueueBatchAppended, TransactionEnqueued};
use rollup_node_primitives::{BlockInfo, RollupTransaction};

/// Test utils for arbitrary.
pub mod arbitrary;

/// Test utils for the checkpoint store.
pub mod checkpoint;
pub use checkpoint::MockCheckpointStore;

/// Test utils for the L1 client.
pub mod l1_client;
pub use l1_client::MockL1Client;

/// Test utils for the log filterer.
pub mod log_filterer;
pub use log_filterer::MockLogFilterer;

/// Installs a test tracing subscriber, if none was installed yet.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Returns the header info at the provided number with a random hash.
pub fn header(number: u64) -> BlockInfo {
    BlockInfo::new(number, random!(B256))
}

/// Returns a `TransactionEnqueued` log emitted by the contract for the transaction, at the
/// transaction's L1 block.
pub fn transaction_enqueued_log(contract: Address, tx: &RollupTransaction) -> Log {
    let event = TransactionEnqueued {
        l1TxOrigin: tx.l1_origin,
        target: tx.target,
        gasLimit: U256::from(tx.gas_limit),
        data: tx.data.clone(),
        queueIndex: U256::from(tx.queue_index),
        timestamp: U256::from(tx.timestamp),
    };
    log(contract, tx.l1_block_number, event.encode_log_data())
}

/// Returns a `QueueBatchAppended` log emitted by the contract at the block number.
pub fn queue_batch_appended_log(
    contract: Address,
    block_number: u64,
    starting_queue_index: u64,
    num_queue_elements: u64,
    total_elements: u64,
) -> Log {
    let event = QueueBatchAppended {
        startingQueueIndex: U256::from(starting_queue_index),
        numQueueElements: U256::from(num_queue_elements),
        totalElements: U256::from(total_elements),
    };
    log(contract, block_number, event.encode_log_data())
}

fn log(address: Address, block_number: u64, data: alloy_primitives::LogData) -> Log {
    let mut log = random!(Log);
    log.inner = alloy_primitives::Log { address, data };
    log.block_number = Some(block_number);
    log.removed = false;
    log
}
