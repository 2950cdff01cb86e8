//! RSA-OAEP key wrapping
//!
//! Wraps the 16 raw bytes of a symmetric key under an RSA public key using
//! OAEP with SHA-256 (digest and MGF1) and an empty label. The payload is
//! always smaller than one RSA block, so there is no chunking.

use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{CryptrError, CryptrResult};

use super::keys::{PrivateKey, PublicKey, SymmetricKey, WrappedKey, SYMMETRIC_KEY_LEN};

/// SHA-256 output length
const OAEP_HASH_LEN: usize = 32;

/// Bytes OAEP adds around the message: two hash lengths plus two
pub const OAEP_OVERHEAD: usize = 2 * OAEP_HASH_LEN + 2;

/// Smallest modulus, in bytes, that can carry a wrapped symmetric key
pub const MIN_MODULUS_LEN: usize = SYMMETRIC_KEY_LEN + OAEP_OVERHEAD;

fn oaep() -> Oaep {
    Oaep::new::<Sha256>()
}

/// Encrypt a symmetric key under an RSA public key
pub fn wrap(key: &SymmetricKey, public_key: &PublicKey) -> CryptrResult<WrappedKey> {
    if public_key.modulus_len() < MIN_MODULUS_LEN {
        return Err(CryptrError::KeyTooSmall {
            modulus_bits: public_key.modulus_bits(),
            required_bits: MIN_MODULUS_LEN * 8,
        });
    }

    let wrapped = public_key
        .as_rsa()
        .encrypt(&mut OsRng, oaep(), key.as_bytes())
        .map_err(|e| wrap_error(e, public_key))?;

    Ok(WrappedKey::from(wrapped))
}

fn wrap_error(err: rsa::Error, public_key: &PublicKey) -> CryptrError {
    match err {
        rsa::Error::MessageTooLong => CryptrError::KeyTooSmall {
            modulus_bits: public_key.modulus_bits(),
            required_bits: MIN_MODULUS_LEN * 8,
        },
        other => CryptrError::WrapFailed(format!("RSA-OAEP encryption failed: {}", other)),
    }
}

/// Recover a symmetric key with the matching RSA private key
///
/// Every failure collapses into `WrapIntegrity`. The private-key operation
/// is blinded and the OAEP check inside `rsa` runs in constant time.
pub fn unwrap(wrapped: &WrappedKey, private_key: &PrivateKey) -> CryptrResult<SymmetricKey> {
    let mut plain = private_key
        .as_rsa()
        .decrypt_blinded(&mut OsRng, oaep(), wrapped.as_bytes())
        .map_err(|_| CryptrError::WrapIntegrity)?;

    let key = SymmetricKey::from_bytes(&plain).map_err(|_| CryptrError::WrapIntegrity);
    plain.zeroize();
    key
}
