//! Error types for cryptr
//!
//! Every cipher operation returns an explicit result. The variants separate
//! cryptographic failures (bad padding, failed unwrap, undersized key) from
//! plumbing failures (I/O, configuration) so callers can tell them apart.

use thiserror::Error;

/// The main error type for cryptr operations
#[derive(Error, Debug)]
pub enum CryptrError {
    /// The operating system random source could not be read
    #[error("Entropy source unavailable: {0}")]
    EntropySource(String),

    /// File open/read/write failures, tagged with the failing stage
    #[error("I/O error: {0}")]
    Io(String),

    /// Encrypted input too short or not block-aligned
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// PKCS#7 padding on the final block did not validate
    #[error("Padding validation failed: wrong key or corrupted ciphertext")]
    PaddingValidation,

    /// RSA modulus cannot hold the OAEP-padded key
    #[error(
        "Public key too small: {modulus_bits}-bit modulus, at least {required_bits} bits required"
    )]
    KeyTooSmall {
        modulus_bits: usize,
        required_bits: usize,
    },

    /// RSA-OAEP encryption failed for a reason other than key size
    #[error("Key wrap failed: {0}")]
    WrapFailed(String),

    /// OAEP unwrap failed. Wrong-key and corrupted-input failures look the same.
    #[error("Key unwrap failed: wrong private key or corrupted input")]
    WrapIntegrity,

    /// Symmetric key material of the wrong length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Public or private key structure could not be parsed
    #[error("Key format error: {0}")]
    KeyFormat(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CryptrError {
    /// Create an I/O error naming the stage and path that failed
    pub fn io(stage: &str, path: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::Io(format!("{} {}: {}", stage, path, err))
    }

    /// Check if this error came from a cryptographic check rather than plumbing
    pub fn is_crypto_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedEnvelope(_)
                | Self::PaddingValidation
                | Self::KeyTooSmall { .. }
                | Self::WrapIntegrity
                | Self::InvalidKey(_)
                | Self::KeyFormat(_)
        )
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for CryptrError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for cryptr operations
pub type CryptrResult<T> = Result<T, CryptrError>;
