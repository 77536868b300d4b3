/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    /// A metadata value could not be parsed.
    #[error("invalid metadata value for key {key}: {value}")]
    InvalidMetadata {
        /// The metadata key.
        key: &'static str,
        /// The stored value.
        value: String,
    },
}
