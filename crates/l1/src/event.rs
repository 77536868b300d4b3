use crate::{CtcLogError, QueueBatchAppended, TransactionEnqueued};

use alloy_primitives::U256;
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use rollup_node_primitives::{BatchAppendDescriptor, RollupTransaction};

/// A decoded canonical transaction chain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtcEvent {
    /// A transaction was enqueued on L1.
    TransactionEnqueued(RollupTransaction),
    /// A contiguous range of enqueued transactions was appended to the L2 history.
    QueueBatchAppended(BatchAppendDescriptor),
    /// A log with a signature that is not handled.
    Unknown,
}

impl CtcEvent {
    /// Decodes the log by dispatching on its first topic.
    ///
    /// Logs without topics or with an unknown signature decode to [`CtcEvent::Unknown`]. A log
    /// carrying a known signature with a malformed payload returns an error.
    pub fn try_decode(log: &Log) -> Result<Self, CtcLogError> {
        let Some(signature) = log.topic0() else { return Ok(Self::Unknown) };

        if *signature == TransactionEnqueued::SIGNATURE_HASH {
            Self::decode_transaction_enqueued(log)
        } else if *signature == QueueBatchAppended::SIGNATURE_HASH {
            Self::decode_queue_batch_appended(log)
        } else {
            Ok(Self::Unknown)
        }
    }

    fn decode_transaction_enqueued(log: &Log) -> Result<Self, CtcLogError> {
        const EVENT: &str = "TransactionEnqueued";
        let event = TransactionEnqueued::decode_log(&log.inner)
            .map_err(|source| CtcLogError::Decode { event: EVENT, source })?
            .data;

        Ok(Self::TransactionEnqueued(RollupTransaction {
            queue_index: to_u64(event.queueIndex, EVENT, "queueIndex")?,
            timestamp: to_u64(event.timestamp, EVENT, "timestamp")?,
            l1_origin: event.l1TxOrigin,
            target: event.target,
            gas_limit: to_u64(event.gasLimit, EVENT, "gasLimit")?,
            data: event.data,
            l1_block_number: log.block_number.unwrap_or_default(),
        }))
    }

    fn decode_queue_batch_appended(log: &Log) -> Result<Self, CtcLogError> {
        const EVENT: &str = "QueueBatchAppended";
        let event = QueueBatchAppended::decode_log(&log.inner)
            .map_err(|source| CtcLogError::Decode { event: EVENT, source })?
            .data;

        Ok(Self::QueueBatchAppended(BatchAppendDescriptor {
            starting_queue_index: to_u64(event.startingQueueIndex, EVENT, "startingQueueIndex")?,
            num_queue_elements: to_u64(event.numQueueElements, EVENT, "numQueueElements")?,
            total_elements: to_u64(event.totalElements, EVENT, "totalElements")?,
        }))
    }
}

fn to_u64(value: U256, event: &'static str, field: &'static str) -> Result<u64, CtcLogError> {
    u64::try_from(value).map_err(|_| CtcLogError::Overflow { event, field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes, Address, Bytes, LogData, B256};

    fn rpc_log(address: Address, data: LogData, block_number: u64) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data },
            block_number: Some(block_number),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_transaction_enqueued() -> eyre::Result<()> {
        let event = TransactionEnqueued {
            l1TxOrigin: address!("EA674fdDe714fd979de3EdF0F56AA9716B898ec8"),
            target: address!("04668ec2f57cc15c381b461b9fedab5d451c8f7f"),
            gasLimit: U256::from(66),
            data: bytes!("0292"),
            queueIndex: U256::ZERO,
            timestamp: U256::from(24),
        };
        let log = rpc_log(Address::random(), event.encode_log_data(), 1);

        let decoded = CtcEvent::try_decode(&log)?;
        assert_eq!(
            decoded,
            CtcEvent::TransactionEnqueued(RollupTransaction {
                queue_index: 0,
                timestamp: 24,
                l1_origin: event.l1TxOrigin,
                target: event.target,
                gas_limit: 66,
                data: event.data,
                l1_block_number: 1,
            })
        );
        Ok(())
    }

    #[test]
    fn test_decode_queue_batch_appended() -> eyre::Result<()> {
        let event = QueueBatchAppended {
            startingQueueIndex: U256::from(5),
            numQueueElements: U256::from(2),
            totalElements: U256::from(7),
        };
        let log = rpc_log(Address::random(), event.encode_log_data(), 3);

        let decoded = CtcEvent::try_decode(&log)?;
        assert_eq!(
            decoded,
            CtcEvent::QueueBatchAppended(BatchAppendDescriptor {
                starting_queue_index: 5,
                num_queue_elements: 2,
                total_elements: 7,
            })
        );
        Ok(())
    }

    #[test]
    fn test_unknown_and_empty_topics_are_ignored() -> eyre::Result<()> {
        let unknown = LogData::new_unchecked(vec![B256::random()], Bytes::new());
        assert_eq!(CtcEvent::try_decode(&rpc_log(Address::ZERO, unknown, 1))?, CtcEvent::Unknown);

        let empty = LogData::new_unchecked(vec![], bytes!("01"));
        assert_eq!(CtcEvent::try_decode(&rpc_log(Address::ZERO, empty, 1))?, CtcEvent::Unknown);
        Ok(())
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let data = LogData::new_unchecked(vec![TransactionEnqueued::SIGNATURE_HASH], bytes!("dead"));
        let err = CtcEvent::try_decode(&rpc_log(Address::ZERO, data, 1)).unwrap_err();
        assert!(matches!(err, CtcLogError::Decode { .. }));
    }

    #[test]
    fn test_overflowing_field_is_an_error() {
        let event = QueueBatchAppended {
            startingQueueIndex: U256::MAX,
            numQueueElements: U256::from(1),
            totalElements: U256::ZERO,
        };
        let err = CtcEvent::try_decode(&rpc_log(Address::ZERO, event.encode_log_data(), 1))
            .unwrap_err();
        assert!(matches!(err, CtcLogError::Overflow { field: "startingQueueIndex", .. }));
    }
}
