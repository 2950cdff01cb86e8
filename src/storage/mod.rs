//! Storage layer for cryptr
//!
//! Key files are raw bytes (secret keys, wrapped keys) or DER (RSA keys).
//! Every output goes through an atomic temp-file-and-rename write.

pub mod file_io;

pub use file_io::{
    open_input, read_key_file, read_private_key, read_public_key, read_wrapped_key,
    write_atomic, write_bytes_atomic, Visibility,
};
