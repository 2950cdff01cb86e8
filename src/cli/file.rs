//! File encryption CLI commands

use std::path::Path;

use crate::config::Settings;
use crate::error::CryptrResult;
use crate::ops;

/// Handle `encryptfile <in> <key> <out>`
pub fn handle_encrypt_file(
    input: &Path,
    key: &Path,
    output: &Path,
    settings: &Settings,
) -> CryptrResult<()> {
    println!(
        "Encrypting {} with key {} to {}",
        input.display(),
        key.display(),
        output.display()
    );
    ops::encrypt_file(input, key, output, settings.chunk_size)?;
    Ok(())
}

/// Handle `decryptfile <in> <key> <out>`
pub fn handle_decrypt_file(
    input: &Path,
    key: &Path,
    output: &Path,
    settings: &Settings,
) -> CryptrResult<()> {
    println!(
        "Decrypting {} with key {} to {}",
        input.display(),
        key.display(),
        output.display()
    );
    ops::decrypt_file(input, key, output, settings.chunk_size)?;
    Ok(())
}
