//! End-to-end file operations
//!
//! Each function here is one complete tool invocation: load inputs, run one
//! cipher operation, and atomically persist the result. Nothing is retried.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::crypto::{keygen, symmetric, wrap, SYMMETRIC_SUITE, WRAP_SUITE};
use crate::error::CryptrResult;
use crate::storage::file_io::{self, Visibility};

/// Generate a fresh symmetric key and write its raw bytes to `out`
pub fn generate_key_file(out: &Path) -> CryptrResult<()> {
    let key = keygen::generate()?;
    file_io::write_bytes_atomic(out, key.as_bytes(), Visibility::Secret)?;
    info!(out = %out.display(), suite = %SYMMETRIC_SUITE, "generated secret key");
    Ok(())
}

/// Encrypt `input` with the key in `key_file`, writing `IV ‖ ciphertext` to `out`
///
/// Returns the number of bytes written.
pub fn encrypt_file(
    input: &Path,
    key_file: &Path,
    out: &Path,
    chunk_size: usize,
) -> CryptrResult<u64> {
    let key = file_io::read_key_file(key_file)?;
    let reader = file_io::open_input(input)?;
    debug!(chunk_size, "encrypting stream");

    let written = file_io::write_atomic(out, Visibility::Normal, |writer| {
        symmetric::encrypt_stream(reader, writer, &key, chunk_size)
    })
    .inspect_err(|e| warn!(input = %input.display(), error = %e, "file encryption failed"))?;

    info!(input = %input.display(), out = %out.display(), bytes = written, "encrypted file");
    Ok(written)
}

/// Decrypt the envelope in `input` with the key in `key_file`, writing plaintext to `out`
///
/// `out` is only created if the whole envelope decrypts and its padding
/// validates. Returns the number of plaintext bytes written.
pub fn decrypt_file(
    input: &Path,
    key_file: &Path,
    out: &Path,
    chunk_size: usize,
) -> CryptrResult<u64> {
    let key = file_io::read_key_file(key_file)?;
    let reader = file_io::open_input(input)?;
    debug!(chunk_size, "decrypting stream");

    let written = file_io::write_atomic(out, Visibility::Normal, |writer| {
        symmetric::decrypt_stream(reader, writer, &key, chunk_size)
    })
    .inspect_err(|e| warn!(input = %input.display(), error = %e, "file decryption failed"))?;

    info!(input = %input.display(), out = %out.display(), bytes = written, "decrypted file");
    Ok(written)
}

/// Wrap the key in `key_file` under the DER public key in `public_key_file`
pub fn encrypt_key_file(key_file: &Path, public_key_file: &Path, out: &Path) -> CryptrResult<()> {
    let key = file_io::read_key_file(key_file)?;
    let public_key = file_io::read_public_key(public_key_file)?;
    debug!(modulus_bits = public_key.modulus_bits(), "wrapping key");

    let wrapped = wrap::wrap(&key, &public_key)
        .inspect_err(|e| warn!(error = %e, "key wrap failed"))?;
    file_io::write_bytes_atomic(out, wrapped.as_bytes(), Visibility::Normal)?;

    info!(out = %out.display(), bytes = wrapped.len(), suite = %WRAP_SUITE, "wrapped key");
    Ok(())
}

/// Unwrap the key in `wrapped_file` with the DER private key in `private_key_file`
pub fn decrypt_key_file(
    wrapped_file: &Path,
    private_key_file: &Path,
    out: &Path,
) -> CryptrResult<()> {
    let wrapped = file_io::read_wrapped_key(wrapped_file)?;
    let private_key = file_io::read_private_key(private_key_file)?;
    debug!(modulus_bits = private_key.modulus_bits(), "unwrapping key");

    let key = wrap::unwrap(&wrapped, &private_key)
        .inspect_err(|e| warn!(error = %e, "key unwrap failed"))?;
    file_io::write_bytes_atomic(out, key.as_bytes(), Visibility::Secret)?;

    info!(out = %out.display(), "unwrapped key");
    Ok(())
}
