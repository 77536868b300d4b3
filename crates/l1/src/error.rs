use alloy_primitives::U256;

/// An error that occurred while decoding a canonical transaction chain log.
#[derive(Debug, thiserror::Error)]
pub enum CtcLogError {
    /// The log matched a known event signature but its payload could not be decoded.
    #[error("failed to decode {event} log: {source}")]
    Decode {
        /// The name of the event.
        event: &'static str,
        /// The decoding error.
        source: alloy_sol_types::Error,
    },
    /// A decoded field does not fit in 64 bits.
    #[error("{event} field {field} overflows u64: {value}")]
    Overflow {
        /// The name of the event.
        event: &'static str,
        /// The name of the field.
        field: &'static str,
        /// The decoded value.
        value: U256,
    },
}
