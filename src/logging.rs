//! Logging System
//!
//! Structured logging setup using the `tracing` crate. The engine emits
//! events from its service layer only; consumers embedding the library into
//! a larger process can skip this module entirely and install their own
//! subscriber.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use the platform
    /// state directory default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Resolve the log file path: explicit config value, OBJTREE_LOG_FILE env,
/// then the platform state directory default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, StorageError> {
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var("OBJTREE_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    let project_dirs = directories::ProjectDirs::from("", "objtree", "objtree").ok_or_else(|| {
        StorageError::Config("Could not determine platform state directory for log file".to_string())
    })?;
    let state_dir = project_dirs
        .state_dir()
        .ok_or_else(|| {
            StorageError::Config("Platform state directory not available for log file".to_string())
        })?
        .to_path_buf();
    Ok(state_dir.join("objtree.log"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputTarget {
    Stdout,
    Stderr,
    File,
    FileAndStderr,
}

fn determine_output(config: &LoggingConfig) -> Result<OutputTarget, StorageError> {
    match config.output.as_str() {
        "stdout" => Ok(OutputTarget::Stdout),
        "stderr" => Ok(OutputTarget::Stderr),
        "file" => Ok(OutputTarget::File),
        "file+stderr" => Ok(OutputTarget::FileAndStderr),
        other => Err(StorageError::Config(format!(
            "Invalid log output destination: {}",
            other
        ))),
    }
}

/// Initialize the logging system.
///
/// The `OBJTREE_LOG` environment variable overrides the configured level and
/// module directives when set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), StorageError> {
    if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| StorageError::Config(format!("Failed to install subscriber: {}", e)))?;
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let output = determine_output(config)?;
    let json = match config.format.as_str() {
        "json" => true,
        "text" => false,
        other => {
            return Err(StorageError::Config(format!(
                "Invalid log format: {}",
                other
            )))
        }
    };

    let open_log_file = || -> Result<std::fs::File, StorageError> {
        let log_file = resolve_log_file_path(config.file.clone())?;
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Config(format!("Failed to create log directory: {}", e))
            })?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| StorageError::Config(format!("Failed to open log file {:?}: {}", log_file, e)))
    };

    let base_subscriber = Registry::default().with(filter);
    let init_err =
        |e: tracing_subscriber::util::TryInitError| StorageError::Config(format!("Failed to install subscriber: {}", e));

    if json {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output {
            OutputTarget::FileAndStderr => {
                let writer = open_log_file()?.and(std::io::stderr);
                base_subscriber
                    .with(layer.with_writer(writer))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::File => {
                let writer = open_log_file()?;
                base_subscriber
                    .with(layer.with_writer(writer))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::Stderr => {
                base_subscriber
                    .with(layer.with_writer(std::io::stderr))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::Stdout => {
                base_subscriber
                    .with(layer.with_writer(std::io::stdout))
                    .try_init()
                    .map_err(init_err)?;
            }
        }
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output {
            OutputTarget::FileAndStderr => {
                let writer = open_log_file()?.and(std::io::stderr);
                base_subscriber
                    .with(layer.with_ansi(false).with_writer(writer))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::File => {
                let writer = open_log_file()?;
                base_subscriber
                    .with(layer.with_ansi(false).with_writer(writer))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::Stderr => {
                base_subscriber
                    .with(layer.with_ansi(config.color).with_writer(std::io::stderr))
                    .try_init()
                    .map_err(init_err)?;
            }
            OutputTarget::Stdout => {
                base_subscriber
                    .with(layer.with_ansi(config.color).with_writer(std::io::stdout))
                    .try_init()
                    .map_err(init_err)?;
            }
        }
    }

    Ok(())
}

/// Build the environment filter from config, unless OBJTREE_LOG overrides it.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, StorageError> {
    if let Ok(filter) = EnvFilter::try_from_env("OBJTREE_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| StorageError::Config(format!("Invalid log level {}: {}", config.level, e)))?;

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| StorageError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "text");
        assert_eq!(config.output, "stderr");
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_determine_output_rejects_unknown_destination() {
        let config = LoggingConfig {
            output: "syslog".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            determine_output(&config),
            Err(StorageError::Config(_))
        ));
    }

    #[test]
    fn test_env_filter_includes_module_directives() {
        let mut config = LoggingConfig::default();
        config
            .modules
            .insert("objtree::service".to_string(), "debug".to_string());
        assert!(build_env_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_directive_is_config_error() {
        let mut config = LoggingConfig::default();
        config
            .modules
            .insert("bad module name".to_string(), "debug".to_string());
        assert!(matches!(
            build_env_filter(&config),
            Err(StorageError::Config(_))
        ));
    }
}
