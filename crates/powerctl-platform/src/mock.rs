//! Mock platform implementations for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    ApiServer, BusDriver, DisplaySurface, InputDriver, PlatformCapabilities, PlatformError,
    PlatformResult, PowerManager, ResetBackend,
};

/// Shared record of teardown step invocations, in order
pub type StepLog = Arc<Mutex<Vec<String>>>;

pub fn new_step_log() -> StepLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Mock reset backend for unit/integration testing
pub struct MockReset {
    capabilities: PlatformCapabilities,
    reset_calls: AtomicUsize,

    /// Configure reset to fail
    pub fail_reset: Arc<Mutex<bool>>,
}

impl MockReset {
    /// An instant mock: no teardown required
    pub fn new() -> Self {
        Self::with_capabilities(PlatformCapabilities::instant(
            crate::ResetMechanism::Watchdog,
        ))
    }

    pub fn with_capabilities(capabilities: PlatformCapabilities) -> Self {
        Self {
            capabilities,
            reset_calls: AtomicUsize::new(0),
            fail_reset: Arc::new(Mutex::new(false)),
        }
    }

    pub fn reset_count(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBackend for MockReset {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn reset(&self) -> PlatformResult<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);

        if *self.fail_reset.lock().unwrap() {
            return Err(PlatformError::ResetFailed("Mock reset failure".into()));
        }

        Ok(())
    }
}

/// Mock power manager recording shutdown delegations
pub struct MockPowerManager {
    shutdown_calls: AtomicUsize,

    /// Configure shutdown to fail
    pub fail_shutdown: Arc<Mutex<bool>>,
}

impl MockPowerManager {
    pub fn new() -> Self {
        Self {
            shutdown_calls: AtomicUsize::new(0),
            fail_shutdown: Arc::new(Mutex::new(false)),
        }
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPowerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerManager for MockPowerManager {
    fn shutdown(&self) -> PlatformResult<()> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);

        if *self.fail_shutdown.lock().unwrap() {
            return Err(PlatformError::PowerOffFailed("Mock shutdown failure".into()));
        }

        Ok(())
    }
}

/// Mock API server that records its deinit into a shared step log
pub struct MockApiServer {
    log: StepLog,

    /// Configure deinit to fail
    pub fail_deinit: Arc<Mutex<bool>>,
}

impl MockApiServer {
    pub fn new(log: StepLog) -> Self {
        Self {
            log,
            fail_deinit: Arc::new(Mutex::new(false)),
        }
    }
}

impl ApiServer for MockApiServer {
    fn deinit(&self) -> PlatformResult<()> {
        self.log.lock().unwrap().push("api-server".into());

        if *self.fail_deinit.lock().unwrap() {
            return Err(PlatformError::Internal("Mock deinit failure".into()));
        }

        Ok(())
    }
}

/// Mock input driver that records its deinit into a shared step log
pub struct MockInputDriver {
    log: StepLog,
}

impl MockInputDriver {
    pub fn new(log: StepLog) -> Self {
        Self { log }
    }
}

impl InputDriver for MockInputDriver {
    fn deinit(&self) -> PlatformResult<()> {
        self.log.lock().unwrap().push("input".into());
        Ok(())
    }
}

/// Mock bus driver that records its release into a shared step log
pub struct MockBusDriver {
    name: String,
    log: StepLog,
}

impl MockBusDriver {
    pub fn new(name: impl Into<String>, log: StepLog) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }
}

impl BusDriver for MockBusDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn release(&self) -> PlatformResult<()> {
        self.log.lock().unwrap().push(format!("bus:{}", self.name));
        Ok(())
    }
}

/// Mock display surface that records its destruction on drop
pub struct MockDisplay {
    log: StepLog,
}

impl MockDisplay {
    pub fn new(log: StepLog) -> Self {
        Self { log }
    }
}

impl DisplaySurface for MockDisplay {}

impl Drop for MockDisplay {
    fn drop(&mut self) {
        self.log.lock().unwrap().push("display".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reset_counts_calls() {
        let backend = MockReset::new();
        assert_eq!(backend.reset_count(), 0);

        backend.reset().unwrap();
        backend.reset().unwrap();
        assert_eq!(backend.reset_count(), 2);
    }

    #[test]
    fn mock_reset_failure() {
        let backend = MockReset::new();
        *backend.fail_reset.lock().unwrap() = true;

        assert!(backend.reset().is_err());
        // The attempt is still counted
        assert_eq!(backend.reset_count(), 1);
    }

    #[test]
    fn mock_display_logs_drop() {
        let log = new_step_log();
        let display = MockDisplay::new(log.clone());
        assert!(log.lock().unwrap().is_empty());

        drop(display);
        assert_eq!(*log.lock().unwrap(), vec!["display".to_string()]);
    }

    #[test]
    fn mock_power_manager_counts_calls() {
        let power = MockPowerManager::new();
        power.shutdown().unwrap();
        assert_eq!(power.shutdown_count(), 1);
    }
}
