//! Uptime clock for deadline enforcement
//!
//! All power-transition deadlines are absolute monotonic timestamps in
//! milliseconds since process start, the host analogue of a firmware
//! millis-since-boot counter. Wall-clock time is never consulted, so
//! deadlines are immune to NTP steps and timezone changes.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Process-wide epoch the uptime counter is measured against.
static UPTIME_EPOCH: OnceLock<Instant> = OnceLock::new();

/// A point in monotonic time, in milliseconds since process start.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Uptime(u64);

impl Uptime {
    /// Current uptime. The epoch is pinned on first use.
    pub fn now() -> Self {
        let epoch = *UPTIME_EPOCH.get_or_init(Instant::now);
        Self(epoch.elapsed().as_millis() as u64)
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Duration elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn duration_since(&self, earlier: Uptime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Duration until `self` as seen from `from`, zero if already past.
    pub fn saturating_duration_until(&self, from: Uptime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(from.0))
    }

    pub fn checked_add(&self, duration: Duration) -> Option<Uptime> {
        self.0.checked_add(duration.as_millis() as u64).map(Uptime)
    }
}

impl std::ops::Add<Duration> for Uptime {
    type Output = Uptime;

    fn add(self, rhs: Duration) -> Self::Output {
        Uptime(self.0 + rhs.as_millis() as u64)
    }
}

impl std::fmt::Display for Uptime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
