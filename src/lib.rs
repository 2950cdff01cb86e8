//! cryptr - local file encryption with shareable keys
//!
//! This library provides the core of the `cryptr` tool: generate a 128-bit
//! secret key, encrypt and decrypt files with it using AES-128-CBC with PKCS#7
//! padding, and wrap that key under an RSA public key with OAEP so it can be
//! shared without exposing it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key material, the envelope format, and the cipher operations
//! - `storage`: Key file loading and atomic output writes
//! - `ops`: One function per tool invocation
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup
//! - `cli`: Command line surface
//!
//! # Example
//!
//! ```rust,no_run
//! use cryptr::crypto::{decrypt, encrypt, generate};
//!
//! let key = generate()?;
//! let envelope = encrypt(b"HELLO", &key)?;
//! assert_eq!(envelope.encode().len(), 32);
//! assert_eq!(decrypt(&envelope, &key)?, b"HELLO");
//! # Ok::<(), cryptr::CryptrError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod ops;
pub mod storage;

pub use error::{CryptrError, CryptrResult};
