//! Shared utilities for powerctl
//!
//! This crate provides:
//! - The uptime clock (monotonic milliseconds since process start)
//! - Duration formatting helpers
//! - Default paths for the daemon configuration

mod paths;
mod time;

pub use paths::*;
pub use time::*;
