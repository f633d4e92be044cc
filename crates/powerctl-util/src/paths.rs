//! Default paths for powerctl components

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const POWERCTL_CONFIG_ENV: &str = "POWERCTL_CONFIG";

const SYSTEM_CONFIG_PATH: &str = "/etc/powerctl/config.toml";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$POWERCTL_CONFIG` environment variable (if set)
/// 2. `/etc/powerctl/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(POWERCTL_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    PathBuf::from(SYSTEM_CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_fallback() {
        // The env override is process-global, so only exercise the fallback
        // when the variable is absent.
        if std::env::var(POWERCTL_CONFIG_ENV).is_err() {
            assert_eq!(default_config_path(), PathBuf::from(SYSTEM_CONFIG_PATH));
        }
    }
}
