//! Engine configuration
//!
//! Layered configuration: an optional TOML file overlaid by `OBJTREE_*`
//! environment variables (`__` separates nested keys, e.g.
//! `OBJTREE_LOGGING__LEVEL=debug`).

use crate::error::StorageError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for embedding processes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from an optional file plus the environment overlay.
    pub fn load(config_file: Option<&Path>) -> Result<Self, StorageError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("OBJTREE")
                .separator("__")
                .try_parsing(true),
        );
        builder
            .build()
            .map_err(|e| StorageError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StorageError::Config(e.to_string()))
    }
}
