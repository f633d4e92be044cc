//! Configuration parsing and validation for powerctl
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Reset backend selection with device-path overrides
//! - Poll interval and signal-request delays
//! - Validation with clear error messages

mod schema;
mod validation;

pub use schema::*;
pub use validation::*;

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Which reset backend the daemon constructs at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetBackendKind {
    Syscall,
    Sysrq,
    Watchdog,
    None,
}

/// Validated service settings
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub poll_interval: Duration,
    pub signal_reboot_delay: Duration,
    pub signal_shutdown_delay: Duration,
}

/// Validated platform settings
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub reset_backend: ResetBackendKind,
    pub sysrq_path: Option<PathBuf>,
    pub watchdog_device: Option<PathBuf>,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub platform: PlatformConfig,
}

impl Config {
    fn from_raw(raw: RawConfig) -> Self {
        let reset_backend = match raw.platform.reset_backend.as_str() {
            "syscall" => ResetBackendKind::Syscall,
            "sysrq" => ResetBackendKind::Sysrq,
            "watchdog" => ResetBackendKind::Watchdog,
            // validate_config has already rejected anything else
            _ => ResetBackendKind::None,
        };

        Self {
            service: ServiceConfig {
                poll_interval: Duration::from_millis(raw.service.poll_interval_ms),
                signal_reboot_delay: Duration::from_millis(raw.service.signal_reboot_delay_ms),
                signal_shutdown_delay: Duration::from_millis(raw.service.signal_shutdown_delay_ms),
            },
            platform: PlatformConfig {
                reset_backend,
                sysrq_path: raw.platform.sysrq_path.map(PathBuf::from),
                watchdog_device: raw.platform.watchdog_device.map(PathBuf::from),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(RawConfig {
            config_version: CURRENT_CONFIG_VERSION,
            service: Default::default(),
            platform: Default::default(),
        })
    }
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Config::from_raw(raw))
}
