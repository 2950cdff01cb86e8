//! Symmetric key generation
//!
//! Keys are drawn straight from the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{CryptrError, CryptrResult};

use super::keys::{SymmetricKey, SYMMETRIC_KEY_LEN};

/// Generate a fresh random 128-bit key from the OS random source
pub fn generate() -> CryptrResult<SymmetricKey> {
    generate_with(&mut OsRng)
}

/// Generate a key from the given cryptographically secure source
pub fn generate_with<R>(rng: &mut R) -> CryptrResult<SymmetricKey>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
    fill_random(rng, &mut bytes)?;
    let key = SymmetricKey::from_array(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Fill `dest` from `rng`, mapping source failure to `EntropySource`
pub(crate) fn fill_random<R>(rng: &mut R, dest: &mut [u8]) -> CryptrResult<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    rng.try_fill_bytes(dest)
        .map_err(|e| CryptrError::EntropySource(format!("Failed to read random bytes: {}", e)))
}
