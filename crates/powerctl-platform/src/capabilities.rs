//! Platform capabilities model

use serde::{Deserialize, Serialize};

/// The hardware mechanism a reset backend uses to restart the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMechanism {
    /// Hardware watchdog expiry: instant, no software teardown possible
    Watchdog,

    /// Vendor-specific system reset register or trigger: instant
    Vendor,

    /// Host reboot syscall: software-initiated, peripherals must be
    /// released first
    Syscall,

    /// No known reset mechanism on this platform
    None,
}

/// Describes what a platform's reset backend can do
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    /// How the backend restarts the device
    pub mechanism: ResetMechanism,

    /// Whether peripherals must be torn down before the reset fires
    pub needs_teardown: bool,

    /// Whether the platform can power off the board entirely
    pub can_power_off: bool,
}

impl PlatformCapabilities {
    /// An instant reset mechanism (watchdog-style) that needs no teardown
    pub fn instant(mechanism: ResetMechanism) -> Self {
        Self {
            mechanism,
            needs_teardown: false,
            can_power_off: false,
        }
    }

    /// A host-process platform: reboot via syscall after releasing
    /// peripherals, with board power-off available
    pub fn host() -> Self {
        Self {
            mechanism: ResetMechanism::Syscall,
            needs_teardown: true,
            can_power_off: true,
        }
    }

    /// A platform with no reset primitive at all
    pub fn unsupported() -> Self {
        Self {
            mechanism: ResetMechanism::None,
            needs_teardown: false,
            can_power_off: false,
        }
    }

    /// Whether any reset mechanism exists
    pub fn can_reset(&self) -> bool {
        self.mechanism != ResetMechanism::None
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::unsupported()
    }
}
