//! Linux power manager

use nix::sys::reboot::{reboot, RebootMode};
use powerctl_platform::{PlatformError, PlatformResult, PowerManager};
use tracing::info;

/// Powers the board off through the reboot(2) syscall.
///
/// Battery/voltage policy lives with whoever schedules the shutdown; this
/// only executes it.
pub struct HostPowerManager;

impl HostPowerManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HostPowerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerManager for HostPowerManager {
    fn shutdown(&self) -> PlatformResult<()> {
        info!("Powering off");

        match reboot(RebootMode::RB_POWER_OFF) {
            Ok(never) => match never {},
            Err(e) => Err(PlatformError::PowerOffFailed(e.to_string())),
        }
    }
}
