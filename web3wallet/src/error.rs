//! Error types for the web3wallet library

use thiserror::Error;

/// Custom error type for key derivation operations
#[derive(Error, Debug)]
pub enum Error {
    /// The platform CSPRNG could not supply entropy
    #[error("Entropy source error: {0}")]
    EntropySource(String),

    /// Account index outside the hardened range
    #[error("Invalid account index: {0} (must be at most 2^31 - 1)")]
    InvalidIndex(u64),

    /// An intermediate child key was not a valid scalar
    #[error("Key derivation error at account index {index}: {reason}")]
    Derivation { index: u32, reason: String },

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Error {
    /// Whether the caller can recover by moving on to the next account index
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Derivation { .. })
    }
}

/// Result type for web3wallet operations
pub type Result<T> = std::result::Result<T, Error>;
