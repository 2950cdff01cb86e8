//! User settings for cryptr
//!
//! Settings live in `config.json` in the configuration directory. Every field
//! has a default, so a missing file or a partial file is fine. The cipher
//! suite is fixed and has no settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::CryptrPaths;
use crate::crypto::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::error::CryptrError;

/// User settings for cryptr
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Streaming buffer size in bytes for file encryption and decryption
    pub chunk_size: usize,

    /// Exit nonzero on usage errors (2) and failed operations (1).
    /// When false every invocation exits 0.
    pub strict_exit_codes: bool,

    /// tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            strict_exit_codes: false,
            log_filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration directory, or defaults if absent
    pub fn load_or_default(paths: &CryptrPaths) -> Result<Self, CryptrError> {
        let settings_path = paths.settings_file();
        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, CryptrError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CryptrError::Config(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            CryptrError::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), CryptrError> {
        if self.chunk_size == 0 {
            return Err(CryptrError::Config(
                "chunk_size must be greater than zero".into(),
            ));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(CryptrError::Config(format!(
                "chunk_size {} exceeds the maximum of {} bytes",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        Ok(())
    }
}
