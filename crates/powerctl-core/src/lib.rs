//! Core deferred power-state transition logic for powerctl
//!
//! This crate is the heart of powerctl, containing:
//! - Deadline state for deferred reboot/shutdown requests
//! - The pre-reboot observer notification
//! - The ordered peripheral teardown sequence
//! - The periodic checker that drives the platform reset primitive

mod checker;
mod notify;
mod scheduler;
mod teardown;

pub use checker::*;
pub use notify::*;
pub use scheduler::*;
pub use teardown::*;
