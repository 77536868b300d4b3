use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    event TransactionEnqueued(
        address l1TxOrigin,
        address target,
        uint256 gasLimit,
        bytes data,
        uint256 queueIndex,
        uint256 timestamp
    );

    #[derive(Debug, PartialEq, Eq)]
    event QueueBatchAppended(
        uint256 startingQueueIndex,
        uint256 numQueueElements,
        uint256 totalElements
    );
}
