/// An enum representing the errors that can occur in the signer.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// An error occurred while signing.
    #[error("Failed to sign: {0}")]
    SigningError(#[from] alloy_signer::Error),
}
