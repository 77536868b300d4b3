//! A library containing the bindings and decoding logic for the canonical transaction chain events
//! emitted on L1.

pub use abi::logs::{QueueBatchAppended, TransactionEnqueued};
mod abi;

pub use error::CtcLogError;
mod error;

pub use event::CtcEvent;
mod event;
