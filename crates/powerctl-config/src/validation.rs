//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Unknown reset backend: {0}")]
    UnknownResetBackend(String),

    #[error("poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("Path override cannot be empty: {field}")]
    EmptyPath { field: &'static str },
}

/// Reset backend names the daemon knows how to construct
pub const KNOWN_RESET_BACKENDS: &[&str] = &["syscall", "sysrq", "watchdog", "none"];

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !KNOWN_RESET_BACKENDS.contains(&config.platform.reset_backend.as_str()) {
        errors.push(ValidationError::UnknownResetBackend(
            config.platform.reset_backend.clone(),
        ));
    }

    if config.service.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if let Some(path) = &config.platform.sysrq_path
        && path.is_empty()
    {
        errors.push(ValidationError::EmptyPath {
            field: "platform.sysrq_path",
        });
    }

    if let Some(path) = &config.platform.watchdog_device
        && path.is_empty()
    {
        errors.push(ValidationError::EmptyPath {
            field: "platform.watchdog_device",
        });
    }

    errors
}
