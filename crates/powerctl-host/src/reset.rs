//! Linux reset backends

use nix::sys::reboot::{reboot, RebootMode};
use powerctl_platform::{
    PlatformCapabilities, PlatformError, PlatformResult, ResetBackend, ResetMechanism,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

const SYSRQ_TRIGGER_PATH: &str = "/proc/sysrq-trigger";
const WATCHDOG_DEVICE_PATH: &str = "/dev/watchdog";

/// Reboot via the reboot(2) syscall.
///
/// Software-initiated, so peripherals get the teardown sequence first.
/// Requires CAP_SYS_BOOT; on failure the pending request stays scheduled
/// and retries on the next poll.
pub struct SyscallReset {
    capabilities: PlatformCapabilities,
}

impl SyscallReset {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities::host(),
        }
    }
}

impl Default for SyscallReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBackend for SyscallReset {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn reset(&self) -> PlatformResult<()> {
        debug!("Final reboot");

        match reboot(RebootMode::RB_AUTOBOOT) {
            Ok(never) => match never {},
            Err(e) => Err(PlatformError::ResetFailed(e.to_string())),
        }
    }
}

/// Immediate reset through the kernel sysrq trigger.
///
/// Writing `b` reboots without syncing or unmounting, the closest host
/// analogue of a vendor system-reset register. No teardown: the kernel
/// does not return to userspace.
pub struct SysrqReset {
    path: PathBuf,
    capabilities: PlatformCapabilities,
}

impl SysrqReset {
    pub fn new() -> Self {
        Self::with_path(SYSRQ_TRIGGER_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capabilities: PlatformCapabilities::instant(ResetMechanism::Vendor),
        }
    }
}

impl Default for SysrqReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBackend for SysrqReset {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn reset(&self) -> PlatformResult<()> {
        debug!(path = %self.path.display(), "Triggering sysrq reboot");
        std::fs::write(&self.path, b"b")?;
        Ok(())
    }
}

/// Reset by arming the hardware watchdog and letting it expire.
///
/// Opening the device starts its timer; closing it without the magic
/// character leaves the timer running, and the hardware resets the board
/// when it expires. Instant from the firmware's point of view, so no
/// teardown.
pub struct WatchdogReset {
    device: PathBuf,
    capabilities: PlatformCapabilities,
}

impl WatchdogReset {
    pub fn new() -> Self {
        Self::with_device(WATCHDOG_DEVICE_PATH)
    }

    pub fn with_device(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            capabilities: PlatformCapabilities::instant(ResetMechanism::Watchdog),
        }
    }
}

impl Default for WatchdogReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBackend for WatchdogReset {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn reset(&self) -> PlatformResult<()> {
        let mut device = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.device)?;
        device.write_all(b"1")?;

        // Dropped without the magic close character: the timer keeps
        // running and the hardware resets when it expires.
        info!(device = %self.device.display(), "Watchdog armed, reset on expiry");
        Ok(())
    }
}
