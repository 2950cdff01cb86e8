//! Path management for cryptr
//!
//! ## Path Resolution Order
//!
//! 1. `CRYPTR_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cryptr` or `~/.config/cryptr`
//! 3. Windows: `%APPDATA%\cryptr`

use std::path::{Path, PathBuf};

use crate::error::CryptrError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "CRYPTR_CONFIG_DIR";

/// Locates cryptr's configuration files
#[derive(Debug, Clone)]
pub struct CryptrPaths {
    base_dir: PathBuf,
}

impl CryptrPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CryptrError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CryptrPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CryptrError> {
    let config_base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                CryptrError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("cryptr"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CryptrError> {
    let appdata = std::env::var_os("APPDATA")
        .ok_or_else(|| CryptrError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cryptr"))
}
