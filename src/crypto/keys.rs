//! Key material value types
//!
//! Symmetric keys are raw 16-byte values, zeroed on drop. Asymmetric keys are
//! accepted only in binary DER form: X.509 SubjectPublicKeyInfo for public keys
//! and PKCS#8 PrivateKeyInfo for private keys.

use std::fmt;

use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptrError, CryptrResult};

/// Length of a symmetric key in bytes (AES-128)
pub const SYMMETRIC_KEY_LEN: usize = 16;

/// A 128-bit AES key
///
/// The key file encoding is the raw 16 bytes with no header.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; SYMMETRIC_KEY_LEN],
}

impl SymmetricKey {
    /// Build a key from exactly 16 raw bytes
    pub fn from_bytes(bytes: &[u8]) -> CryptrResult<Self> {
        let bytes: [u8; SYMMETRIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptrError::InvalidKey(format!(
                "expected {} bytes, got {}",
                SYMMETRIC_KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    pub(crate) fn from_array(bytes: [u8; SYMMETRIC_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.bytes
    }
}

// Never print key bytes
impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &SYMMETRIC_KEY_LEN)
            .finish()
    }
}

/// An RSA public key, used only for wrapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// Parse a DER-encoded SubjectPublicKeyInfo structure
    pub fn from_der(der: &[u8]) -> CryptrResult<Self> {
        let inner = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CryptrError::KeyFormat(format!("Invalid RSA public key: {}", e)))?;
        Ok(Self { inner })
    }

    /// Modulus length in bytes, which is also the wrapped key length
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Modulus size in bits
    pub fn modulus_bits(&self) -> usize {
        self.inner.n().bits()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.inner
    }
}

/// An RSA private key, used only for unwrapping
#[derive(Clone)]
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// Parse a DER-encoded PKCS#8 PrivateKeyInfo structure
    pub fn from_der(der: &[u8]) -> CryptrResult<Self> {
        let inner = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| CryptrError::KeyFormat(format!("Invalid RSA private key: {}", e)))?;
        Ok(Self { inner })
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    /// Modulus size in bits
    pub fn modulus_bits(&self) -> usize {
        self.inner.n().bits()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(inner: RsaPrivateKey) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("modulus_bits", &self.modulus_bits())
            .finish()
    }
}

/// A symmetric key encrypted under an RSA public key
///
/// The file encoding is the raw RSA-OAEP ciphertext, one modulus in length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedKey {
    bytes: Vec<u8>,
}

impl WrappedKey {
    /// Get the wrapped bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for WrappedKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
