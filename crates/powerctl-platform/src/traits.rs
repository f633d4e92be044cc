//! Platform traits
//!
//! The checker drives every platform through these interfaces. Real
//! implementations live in platform crates (`powerctl-host` for Linux);
//! the external subsystems released during teardown stay behind the
//! collaborator traits and are never managed here.

use thiserror::Error;
use tracing::warn;

use crate::PlatformCapabilities;

/// Errors from platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Reset failed: {0}")]
    ResetFailed(String),

    #[error("Power off failed: {0}")]
    PowerOffFailed(String),

    #[error("No reset mechanism on this platform")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Platform reset primitive
///
/// Exactly one backend is active per process, selected from configuration
/// at startup.
pub trait ResetBackend: Send + Sync {
    /// Get the capabilities of this backend
    fn capabilities(&self) -> &PlatformCapabilities;

    /// Restart the device. On real hardware this does not return; on a
    /// failed syscall or in tests it returns so the caller can log.
    fn reset(&self) -> PlatformResult<()>;
}

/// External owner of the physical shutdown sequence. The checker delegates
/// the shutdown branch here and does not inspect the result beyond logging.
pub trait PowerManager: Send + Sync {
    fn shutdown(&self) -> PlatformResult<()>;
}

/// Network/API server released during teardown
pub trait ApiServer: Send + Sync {
    fn deinit(&self) -> PlatformResult<()>;
}

/// Human-input device driver released during teardown
pub trait InputDriver: Send + Sync {
    fn deinit(&self) -> PlatformResult<()>;
}

/// A bus peripheral driver (SPI, I2C, UART, ...) released during teardown.
/// Peripherals that depend on a bus must be registered before the bus.
pub trait BusDriver: Send + Sync {
    fn name(&self) -> &str;

    fn release(&self) -> PlatformResult<()>;
}

/// Display/screen object destroyed (dropped) at the end of teardown.
/// Other subsystems may still reference the display during their own
/// deinit, which is why it goes last.
pub trait DisplaySurface: Send + Sync {}

/// Backend for platforms with no known reset primitive. The checker sees
/// `ResetMechanism::None` and degrades gracefully instead of calling
/// `reset`, so this only errors if invoked anyway.
pub struct UnsupportedReset {
    capabilities: PlatformCapabilities,
}

impl UnsupportedReset {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities::unsupported(),
        }
    }
}

impl Default for UnsupportedReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBackend for UnsupportedReset {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn reset(&self) -> PlatformResult<()> {
        warn!("reset requested on a platform with no reset mechanism");
        Err(PlatformError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_backend_reports_no_mechanism() {
        let backend = UnsupportedReset::new();
        assert!(!backend.capabilities().can_reset());
        assert!(matches!(backend.reset(), Err(PlatformError::Unsupported)));
    }
}
