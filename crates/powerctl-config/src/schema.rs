//! Raw configuration schema (serde types, pre-validation)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub config_version: u32,

    #[serde(default)]
    pub service: RawServiceConfig,

    #[serde(default)]
    pub platform: RawPlatformConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RawServiceConfig {
    /// Checker poll interval in milliseconds
    pub poll_interval_ms: u64,

    /// Delay applied when SIGUSR1 requests a reboot
    pub signal_reboot_delay_ms: u64,

    /// Delay applied when SIGUSR2 requests a shutdown
    pub signal_shutdown_delay_ms: u64,
}

impl Default for RawServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            signal_reboot_delay_ms: 3_000,
            signal_shutdown_delay_ms: 3_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RawPlatformConfig {
    /// Reset backend selection: "syscall", "sysrq", "watchdog", or "none"
    pub reset_backend: String,

    /// Override for the sysrq trigger file
    pub sysrq_path: Option<String>,

    /// Override for the watchdog device
    pub watchdog_device: Option<String>,
}

impl Default for RawPlatformConfig {
    fn default() -> Self {
        Self {
            reset_backend: "syscall".into(),
            sysrq_path: None,
            watchdog_device: None,
        }
    }
}
