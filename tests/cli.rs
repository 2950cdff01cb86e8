//! End-to-end tests for the cryptr binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::RsaPrivateKey;
use tempfile::TempDir;

fn cryptr(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cryptr").unwrap();
    cmd.env("CRYPTR_CONFIG_DIR", config_dir).env_remove("RUST_LOG");
    cmd
}

fn strict_config(dir: &Path) {
    fs::write(dir.join("config.json"), r#"{"strict_exit_codes": true}"#).unwrap();
}

fn write_rsa_keys(dir: &Path) -> (PathBuf, PathBuf) {
    let private = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
    let public_path = dir.join("public.der");
    let private_path = dir.join("private.der");
    fs::write(
        &public_path,
        private.to_public_key().to_public_key_der().unwrap().as_bytes(),
    )
    .unwrap();
    fs::write(&private_path, private.to_pkcs8_der().unwrap().as_bytes()).unwrap();
    (public_path, private_path)
}

#[test]
fn test_generatekey_writes_sixteen_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let key = temp_dir.path().join("k.key");

    cryptr(temp_dir.path())
        .arg("generatekey")
        .arg(&key)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating secret key and writing it to"));

    assert_eq!(fs::read(&key).unwrap().len(), 16);
}

#[test]
fn test_encrypt_decrypt_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = dir.join("k.key");
    let plain = dir.join("hello.txt");
    let sealed = dir.join("hello.enc");
    let opened = dir.join("hello.out");
    fs::write(&plain, b"HELLO").unwrap();

    cryptr(dir).arg("generatekey").arg(&key).assert().success();
    cryptr(dir)
        .arg("encryptfile")
        .args([&plain, &key, &sealed])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypting"));
    assert_eq!(fs::read(&sealed).unwrap().len(), 32);

    cryptr(dir)
        .arg("decryptfile")
        .args([&sealed, &key, &opened])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decrypting"));
    assert_eq!(fs::read(&opened).unwrap(), b"HELLO");
}

#[test]
fn test_wrong_argument_count_exits_zero_by_default() {
    let temp_dir = TempDir::new().unwrap();

    cryptr(temp_dir.path())
        .args(["encryptfile", "only-one-arg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid Arguments."))
        .stdout(predicate::str::contains("Usage: cryptr encryptfile"));
}

#[test]
fn test_unknown_subcommand_lists_all_usage() {
    let temp_dir = TempDir::new().unwrap();

    cryptr(temp_dir.path())
        .arg("shred")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid Arguments."))
        .stdout(predicate::str::contains("cryptr generatekey"))
        .stdout(predicate::str::contains("cryptr decryptkey"));
}

#[test]
fn test_strict_exit_code_for_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    strict_config(temp_dir.path());

    cryptr(temp_dir.path())
        .args(["generatekey", "a", "b"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid Arguments."));
}

#[test]
fn test_strict_exit_code_for_failed_decrypt() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = dir.join("k.key");
    let plain = dir.join("hello.txt");
    let sealed = dir.join("hello.enc");
    let opened = dir.join("hello.out");
    fs::write(&key, [7u8; 16]).unwrap();
    fs::write(&plain, b"HELLO").unwrap();

    cryptr(dir)
        .arg("encryptfile")
        .args([&plain, &key, &sealed])
        .assert()
        .success();
    let mut bytes = fs::read(&sealed).unwrap();
    bytes.truncate(20);
    fs::write(&sealed, bytes).unwrap();

    strict_config(dir);
    cryptr(dir)
        .arg("decryptfile")
        .args([&sealed, &key, &opened])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Malformed envelope"));
    assert!(!opened.exists());
}

#[test]
fn test_failed_decrypt_exits_zero_by_default_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = dir.join("k.key");
    let sealed = dir.join("short.enc");
    let opened = dir.join("short.out");
    fs::write(&key, [7u8; 16]).unwrap();
    fs::write(&sealed, [0u8; 10]).unwrap();

    cryptr(dir)
        .arg("decryptfile")
        .args([&sealed, &key, &opened])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error:"));
    assert!(!opened.exists());
}

#[test]
fn test_explicit_config_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.json");
    fs::write(&config, r#"{"strict_exit_codes": true}"#).unwrap();

    cryptr(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("decryptkey")
        .assert()
        .code(2);
}

#[test]
fn test_key_wrap_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let (public_der, private_der) = write_rsa_keys(dir);
    let key = dir.join("k.key");
    let wrapped = dir.join("k.wrapped");
    let recovered = dir.join("k.recovered");

    cryptr(dir).arg("generatekey").arg(&key).assert().success();
    cryptr(dir)
        .arg("encryptkey")
        .args([&key, &public_der, &wrapped])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypting key file"));
    assert_eq!(fs::read(&wrapped).unwrap().len(), 128);

    cryptr(dir)
        .arg("decryptkey")
        .args([&wrapped, &private_der, &recovered])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decrypting key file"));
    assert_eq!(fs::read(&recovered).unwrap(), fs::read(&key).unwrap());
}

#[test]
fn test_decryptkey_with_corrupted_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let (_, private_der) = write_rsa_keys(dir);
    let wrapped = dir.join("garbage.wrapped");
    let recovered = dir.join("k.recovered");
    fs::write(&wrapped, [0x42u8; 128]).unwrap();
    strict_config(dir);

    cryptr(dir)
        .arg("decryptkey")
        .args([&wrapped, &private_der, &recovered])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Key unwrap failed"));
    assert!(!recovered.exists());
}

#[test]
fn test_bare_invocation_reports_invalid_arguments() {
    let temp_dir = TempDir::new().unwrap();

    cryptr(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid Arguments.\nUsage:"))
        .stdout(predicate::str::contains("cryptr encryptkey"));
}

#[test]
fn test_bare_invocation_strict_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    strict_config(temp_dir.path());

    cryptr(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid Arguments."));
}

#[test]
fn test_decryptfile_usage_names_secret_key() {
    let temp_dir = TempDir::new().unwrap();

    cryptr(temp_dir.path())
        .arg("decryptfile")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Usage: cryptr decryptfile <file to decrypt> <secret key file> <decrypted output file>",
        ));
}
