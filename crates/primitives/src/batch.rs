use core::ops::Range;

/// The decoded payload of a `QueueBatchAppended` event.
///
/// Declares the contiguous range `[starting_queue_index, starting_queue_index +
/// num_queue_elements)` of enqueued transactions which have been appended to the L2 history.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct BatchAppendDescriptor {
    /// The first queue index of the batch.
    pub starting_queue_index: u64,
    /// The number of queue elements in the batch.
    pub num_queue_elements: u64,
    /// The total number of elements in the canonical transaction chain.
    pub total_elements: u64,
}

impl BatchAppendDescriptor {
    /// Returns the range of queue indices covered by the batch, or `None` if the range overflows.
    pub fn queue_indices(&self) -> Option<Range<u64>> {
        let end = self.starting_queue_index.checked_add(self.num_queue_elements)?;
        Some(self.starting_queue_index..end)
    }
}
