//! The periodic power-command checker
//!
//! Polled once per main-loop iteration. Reboot is evaluated strictly
//! before shutdown: when both deadlines have expired in the same poll the
//! reboot wins, and on platforms whose reset does not return the shutdown
//! never executes. That is accepted behavior, not a bug.

use powerctl_platform::{PowerManager, ResetBackend};
use powerctl_util::Uptime;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{RebootNotice, RebootNotifier, TeardownSequence, TransitionScheduler};

/// Drives deferred power-state transitions against one platform backend.
///
/// Holds the process-wide [`TransitionScheduler`]; external callers record
/// deadlines through [`scheduler_mut`](Self::scheduler_mut) and the poll
/// loop invokes [`check_pending_power_commands`](Self::check_pending_power_commands).
pub struct PowerCommandChecker {
    scheduler: TransitionScheduler,
    backend: Arc<dyn ResetBackend>,
    power: Arc<dyn PowerManager>,
    notifier: RebootNotifier,
    teardown: TeardownSequence,
}

impl PowerCommandChecker {
    pub fn new(backend: Arc<dyn ResetBackend>, power: Arc<dyn PowerManager>) -> Self {
        Self {
            scheduler: TransitionScheduler::new(),
            backend,
            power,
            notifier: RebootNotifier::new(),
            teardown: TeardownSequence::new(),
        }
    }

    /// Attach the peripheral teardown sequence run before explicit resets
    pub fn with_teardown(mut self, teardown: TeardownSequence) -> Self {
        self.teardown = teardown;
        self
    }

    pub fn scheduler(&self) -> &TransitionScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut TransitionScheduler {
        &mut self.scheduler
    }

    /// Register an observer for the pre-reboot notification
    pub fn subscribe_reboot(&mut self) -> mpsc::UnboundedReceiver<RebootNotice> {
        self.notifier.subscribe()
    }

    /// Check both deadlines against `now` and execute whichever transition
    /// is due, reboot first.
    ///
    /// Non-blocking except for the terminal reset call, which does not
    /// return on real hardware. Nothing is reported to the caller; all
    /// outcomes are observed via logs, the notification, or process
    /// termination.
    pub fn check_pending_power_commands(&mut self, now: Uptime) {
        if self.scheduler.reboot_due(now) {
            info!("Rebooting");

            // Published before teardown so observers can still reach
            // peripherals.
            self.notifier.publish();

            let caps = self.backend.capabilities();
            if !caps.can_reset() {
                self.scheduler.disable_reboot();
                warn!(
                    "No reset mechanism on this platform; dropping the reboot request. \
                     Settings that need a restart will not be applied"
                );
                return;
            }

            if caps.needs_teardown {
                self.teardown.run();
            }

            // Does not return on real hardware. The reboot deadline is
            // deliberately left pending: on a host build a failed syscall
            // retries on the next poll.
            if let Err(e) = self.backend.reset() {
                warn!(error = %e, "Reset failed");
            }
            return;
        }

        if self.scheduler.shutdown_due(now) {
            // Cleared before delegating so a slow or asynchronous power
            // manager cannot be invoked twice.
            self.scheduler.clear_shutdown();

            info!("Shutting down");
            if let Err(e) = self.power.shutdown() {
                warn!(error = %e, "Power manager shutdown failed");
            }
        }
    }
}
