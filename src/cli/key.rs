//! Key management CLI commands

use std::path::Path;

use crate::error::CryptrResult;
use crate::ops;

/// Handle `generatekey <out>`
pub fn handle_generate_key(key_out: &Path) -> CryptrResult<()> {
    println!(
        "Generating secret key and writing it to {}",
        key_out.display()
    );
    ops::generate_key_file(key_out)
}

/// Handle `encryptkey <key> <pubkey> <out>`
pub fn handle_encrypt_key(key: &Path, public_key: &Path, output: &Path) -> CryptrResult<()> {
    println!(
        "Encrypting key file {} with public key file {} to {}",
        key.display(),
        public_key.display(),
        output.display()
    );
    ops::encrypt_key_file(key, public_key, output)
}

/// Handle `decryptkey <wrappedkey> <privkey> <out>`
pub fn handle_decrypt_key(
    wrapped_key: &Path,
    private_key: &Path,
    output: &Path,
) -> CryptrResult<()> {
    println!(
        "Decrypting key file {} with private key file {} to {}",
        wrapped_key.display(),
        private_key.display(),
        output.display()
    );
    ops::decrypt_key_file(wrapped_key, private_key, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_keypair, write_der_keys};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_then_share_key() {
        let temp_dir = TempDir::new().unwrap();
        let (public_der, private_der) = write_der_keys(temp_dir.path(), test_keypair());
        let key = temp_dir.path().join("k.key");
        let wrapped = temp_dir.path().join("k.wrapped");
        let recovered = temp_dir.path().join("k.recovered");

        handle_generate_key(&key).unwrap();
        handle_encrypt_key(&key, &public_der, &wrapped).unwrap();
        handle_decrypt_key(&wrapped, &private_der, &recovered).unwrap();

        assert_eq!(fs::read(&recovered).unwrap(), fs::read(&key).unwrap());
        assert_eq!(fs::read(&wrapped).unwrap().len(), 128);
    }

    #[test]
    fn test_encrypt_key_rejects_pem_text() {
        let temp_dir = TempDir::new().unwrap();
        let key = temp_dir.path().join("k.key");
        let pem = temp_dir.path().join("public.pem");
        fs::write(&key, [3u8; 16]).unwrap();
        fs::write(&pem, "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n").unwrap();

        let err = handle_encrypt_key(&key, &pem, &temp_dir.path().join("out")).unwrap_err();
        assert!(matches!(err, crate::error::CryptrError::KeyFormat(_)));
    }
}
