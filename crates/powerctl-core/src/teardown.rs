//! Ordered peripheral teardown before an explicit reset
//!
//! Run only on platforms whose reset is software-initiated: an instant
//! watchdog or vendor reset does not give peripherals a chance to release
//! anyway. Order is fixed because bus clients must release before the bus
//! itself, and the display goes last since other subsystems may still
//! reference it during their own deinit.

use powerctl_platform::{ApiServer, BusDriver, DisplaySurface, InputDriver};
use tracing::{debug, warn};

/// The ordered release/deinit sequence executed immediately before a
/// software-initiated reset. Collaborators are registered at startup;
/// absent ones are skipped.
#[derive(Default)]
pub struct TeardownSequence {
    api_server: Option<Box<dyn ApiServer>>,
    input: Option<Box<dyn InputDriver>>,
    buses: Vec<Box<dyn BusDriver>>,
    display: Option<Box<dyn DisplaySurface>>,
}

impl TeardownSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_server(mut self, server: Box<dyn ApiServer>) -> Self {
        self.api_server = Some(server);
        self
    }

    pub fn with_input_driver(mut self, input: Box<dyn InputDriver>) -> Self {
        self.input = Some(input);
        self
    }

    /// Register a bus peripheral driver. Release order follows
    /// registration order, so register bus clients before the bus.
    pub fn with_bus_driver(mut self, bus: Box<dyn BusDriver>) -> Self {
        self.buses.push(bus);
        self
    }

    pub fn with_display(mut self, display: Box<dyn DisplaySurface>) -> Self {
        self.display = Some(display);
        self
    }

    /// Run the sequence. Best-effort: step failures are logged and the
    /// sequence continues, since the process is about to terminate.
    pub fn run(&mut self) {
        if let Some(server) = &self.api_server {
            debug!("Deinitializing API server");
            if let Err(e) = server.deinit() {
                warn!(error = %e, "API server deinit failed");
            }
        }

        if let Some(input) = &self.input {
            debug!("Deinitializing input driver");
            if let Err(e) = input.deinit() {
                warn!(error = %e, "Input driver deinit failed");
            }
        }

        for bus in &self.buses {
            debug!(bus = bus.name(), "Releasing bus driver");
            if let Err(e) = bus.release() {
                warn!(bus = bus.name(), error = %e, "Bus release failed");
            }
        }

        if let Some(display) = self.display.take() {
            debug!("Destroying display");
            drop(display);
        }
    }
}
