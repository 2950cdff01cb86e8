//! Cryptographic core for cryptr
//!
//! Exactly one suite is supported and it is fixed at compile time:
//! AES-128/CBC/PKCS7 for file data and RSA/OAEP-SHA256 for key wrapping.

use std::fmt;

pub mod envelope;
pub mod keygen;
pub mod keys;
pub mod symmetric;
pub mod wrap;

pub use envelope::{Envelope, Iv, BLOCK_LEN, IV_LEN};
pub use keygen::generate;
pub use keys::{PrivateKey, PublicKey, SymmetricKey, WrappedKey, SYMMETRIC_KEY_LEN};
pub use symmetric::{
    decrypt, decrypt_stream, encrypt, encrypt_stream, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};
pub use wrap::{unwrap, wrap, MIN_MODULUS_LEN};

/// The fixed cipher suite, for logs and help text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuite {
    pub algorithm: &'static str,
    pub key_bits: usize,
    /// Block mode; `None` for the RSA suite
    pub mode: Option<&'static str>,
    pub padding: &'static str,
}

/// File encryption suite
pub const SYMMETRIC_SUITE: CipherSuite = CipherSuite {
    algorithm: "AES",
    key_bits: SYMMETRIC_KEY_LEN * 8,
    mode: Some("CBC"),
    padding: "PKCS7",
};

/// Key wrapping suite. `key_bits` is the smallest modulus accepted.
pub const WRAP_SUITE: CipherSuite = CipherSuite {
    algorithm: "RSA",
    key_bits: MIN_MODULUS_LEN * 8,
    mode: None,
    padding: "OAEP-SHA256",
};

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Some(mode) => write!(
                f,
                "{}-{}/{}/{}",
                self.algorithm, self.key_bits, mode, self.padding
            ),
            None => write!(f, "{}/{}", self.algorithm, self.padding),
        }
    }
}
