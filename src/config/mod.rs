//! Configuration module for cryptr
//!
//! - Configuration directory resolution
//! - User settings (streaming chunk size, exit-code policy, log filter)

pub mod paths;
pub mod settings;

pub use paths::CryptrPaths;
pub use settings::Settings;
