//! Deadline state for deferred power-state transitions

use powerctl_util::Uptime;
use std::time::Duration;
use tracing::debug;

/// A deferred transition deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deadline {
    /// Nothing pending
    #[default]
    Unset,

    /// Permanently unreachable: the request was dropped because the
    /// running platform cannot honor it
    Disabled,

    /// Pending at an absolute uptime
    At(Uptime),
}

impl Deadline {
    pub fn is_due(&self, now: Uptime) -> bool {
        matches!(self, Deadline::At(at) if now >= *at)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Deadline::At(_))
    }
}

/// Process-wide deadline state for deferred reboot/shutdown requests.
///
/// Owned explicitly and handed by reference to any component that may
/// request a transition; the checker consumes it on each poll. The two
/// deadlines are independent and may both be pending at once.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    reboot_at: Deadline,
    shutdown_at: Deadline,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reboot request due at an absolute uptime
    pub fn schedule_reboot_at(&mut self, at: Uptime) {
        debug!(deadline = %at, "Reboot scheduled");
        self.reboot_at = Deadline::At(at);
    }

    /// Record a reboot request due `delay` from `now`; returns the deadline
    pub fn schedule_reboot_in(&mut self, delay: Duration, now: Uptime) -> Uptime {
        let at = now + delay;
        self.schedule_reboot_at(at);
        at
    }

    /// Record a shutdown request due at an absolute uptime
    pub fn schedule_shutdown_at(&mut self, at: Uptime) {
        debug!(deadline = %at, "Shutdown scheduled");
        self.shutdown_at = Deadline::At(at);
    }

    /// Record a shutdown request due `delay` from `now`; returns the deadline
    pub fn schedule_shutdown_in(&mut self, delay: Duration, now: Uptime) -> Uptime {
        let at = now + delay;
        self.schedule_shutdown_at(at);
        at
    }

    /// Cancel a pending reboot. Has no effect once the deadline has fired.
    pub fn cancel_reboot(&mut self) {
        debug!("Reboot request canceled");
        self.reboot_at = Deadline::Unset;
    }

    /// Cancel a pending shutdown
    pub fn cancel_shutdown(&mut self) {
        debug!("Shutdown request canceled");
        self.shutdown_at = Deadline::Unset;
    }

    /// Drop the pending reboot request permanently. Used when the running
    /// platform has no reset primitive: the deadline becomes unreachable
    /// and polling never retries.
    pub fn disable_reboot(&mut self) {
        self.reboot_at = Deadline::Disabled;
    }

    /// Clear the shutdown deadline without the cancellation log. The
    /// checker calls this immediately before delegating so a slow or
    /// asynchronous power manager cannot be invoked twice.
    pub fn clear_shutdown(&mut self) {
        self.shutdown_at = Deadline::Unset;
    }

    pub fn reboot_deadline(&self) -> Deadline {
        self.reboot_at
    }

    pub fn shutdown_deadline(&self) -> Deadline {
        self.shutdown_at
    }

    pub fn reboot_due(&self, now: Uptime) -> bool {
        self.reboot_at.is_due(now)
    }

    pub fn shutdown_due(&self, now: Uptime) -> bool {
        self.shutdown_at.is_due(now)
    }
}
