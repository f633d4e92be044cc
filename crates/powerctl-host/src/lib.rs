//! Linux host implementations of the powerctl platform traits
//!
//! Three reset backends cover the mechanisms a Linux device ships with:
//! the reboot(2) syscall (software-initiated, peripherals torn down
//! first), the kernel sysrq trigger (immediate), and the hardware
//! watchdog device (armed and left to expire). Plus the power manager
//! that owns board power-off.

mod power;
mod reset;

pub use power::*;
pub use reset::*;
