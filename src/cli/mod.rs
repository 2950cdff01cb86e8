//! CLI command handlers
//!
//! This module contains the clap surface for the five subcommands and the
//! dispatch from parsed arguments to the operations layer.

pub mod file;
pub mod key;
pub mod usage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::error::CryptrResult;

pub use file::{handle_decrypt_file, handle_encrypt_file};
pub use key::{handle_decrypt_key, handle_encrypt_key, handle_generate_key};

#[derive(Debug, Parser)]
#[command(
    name = "cryptr",
    version,
    about = "Encrypt files with AES-128-CBC and share their keys with RSA-OAEP",
    long_about = "cryptr generates secret keys, encrypts and decrypts files with them, \
                  and encrypts those keys under an RSA public key (DER) so they can \
                  be shared and recovered with the matching private key.",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Settings file to use instead of the default config.json
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a 128-bit secret key and write it to a file
    #[command(name = "generatekey")]
    GenerateKey {
        /// Key output file
        key_out: PathBuf,
    },

    /// Encrypt a file with a secret key
    #[command(name = "encryptfile")]
    EncryptFile {
        /// File to encrypt
        input: PathBuf,
        /// Secret key file
        key: PathBuf,
        /// Encrypted output file
        output: PathBuf,
    },

    /// Decrypt a file with a secret key
    #[command(name = "decryptfile")]
    DecryptFile {
        /// File to decrypt
        input: PathBuf,
        /// Secret key file
        key: PathBuf,
        /// Decrypted output file
        output: PathBuf,
    },

    /// Encrypt a secret key with an RSA public key (DER)
    #[command(name = "encryptkey")]
    EncryptKey {
        /// Key to encrypt
        key: PathBuf,
        /// Public key to encrypt with
        public_key: PathBuf,
        /// Encrypted key file
        output: PathBuf,
    },

    /// Decrypt a secret key with an RSA private key (DER)
    #[command(name = "decryptkey")]
    DecryptKey {
        /// Key to decrypt
        wrapped_key: PathBuf,
        /// Private key to decrypt with
        private_key: PathBuf,
        /// Decrypted key file
        output: PathBuf,
    },
}

/// How an invocation ended, for exit-code selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    UsageError,
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome
    ///
    /// Without `strict` every outcome exits 0.
    pub fn exit_status(self, strict: bool) -> u8 {
        if !strict {
            return 0;
        }
        match self {
            Outcome::Success => 0,
            Outcome::Failed => 1,
            Outcome::UsageError => 2,
        }
    }
}

/// Run one parsed subcommand
pub fn handle_command(command: Commands, settings: &Settings) -> CryptrResult<()> {
    match command {
        Commands::GenerateKey { key_out } => handle_generate_key(&key_out),
        Commands::EncryptFile { input, key, output } => {
            handle_encrypt_file(&input, &key, &output, settings)
        }
        Commands::DecryptFile { input, key, output } => {
            handle_decrypt_file(&input, &key, &output, settings)
        }
        Commands::EncryptKey {
            key,
            public_key,
            output,
        } => handle_encrypt_key(&key, &public_key, &output),
        Commands::DecryptKey {
            wrapped_key,
            private_key,
            output,
        } => handle_decrypt_key(&wrapped_key, &private_key, &output),
    }
}
