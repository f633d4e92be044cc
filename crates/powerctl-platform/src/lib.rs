//! Platform abstraction for powerctl
//!
//! This crate defines the capability-based interface between the core
//! checker and platform-specific reset/power-off implementations. It
//! contains no platform code itself.

mod capabilities;
mod mock;
mod traits;

pub use capabilities::*;
pub use mock::*;
pub use traits::*;
