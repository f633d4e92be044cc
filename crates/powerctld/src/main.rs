//! powerctld - the deferred power-state transition daemon
//!
//! This is the main entry point for the powerctld service.
//! It wires together all the components:
//! - Configuration loading
//! - Reset backend selection
//! - Power manager
//! - The periodic power-command checker
//! - Unix signal handling for deadline requests

use anyhow::{Context, Result};
use clap::Parser;
use powerctl_config::{load_config, Config, ResetBackendKind};
use powerctl_core::PowerCommandChecker;
use powerctl_host::{HostPowerManager, SyscallReset, SysrqReset, WatchdogReset};
use powerctl_platform::{PowerManager, ResetBackend, UnsupportedReset};
use powerctl_util::{default_config_path, format_duration, Uptime};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// powerctld - executes deferred reboot/shutdown requests
#[derive(Parser, Debug)]
#[command(name = "powerctld")]
#[command(about = "Deferred power-state transition daemon", long_about = None)]
struct Args {
    /// Configuration file path (default: /etc/powerctl/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    checker: Arc<Mutex<PowerCommandChecker>>,
    config: Config,
}

fn build_backend(config: &Config) -> Arc<dyn ResetBackend> {
    match config.platform.reset_backend {
        ResetBackendKind::Syscall => Arc::new(SyscallReset::new()),
        ResetBackendKind::Sysrq => match &config.platform.sysrq_path {
            Some(path) => Arc::new(SysrqReset::with_path(path)),
            None => Arc::new(SysrqReset::new()),
        },
        ResetBackendKind::Watchdog => match &config.platform.watchdog_device {
            Some(device) => Arc::new(WatchdogReset::with_device(device)),
            None => Arc::new(WatchdogReset::new()),
        },
        ResetBackendKind::None => Arc::new(UnsupportedReset::new()),
    }
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        // Missing config falls back to defaults: the daemon must come up
        // on a freshly imaged device.
        let config = if args.config.exists() {
            load_config(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?
        } else {
            warn!(
                config_path = %args.config.display(),
                "Config file not found, using defaults"
            );
            Config::default()
        };

        info!(
            backend = ?config.platform.reset_backend,
            poll_interval_ms = config.service.poll_interval.as_millis() as u64,
            "Configuration loaded"
        );

        let backend = build_backend(&config);
        let power: Arc<dyn PowerManager> = Arc::new(HostPowerManager::new());

        let mut checker = PowerCommandChecker::new(backend, power);

        // Log-only observer for the pre-reboot notification
        let mut reboot_rx = checker.subscribe_reboot();
        tokio::spawn(async move {
            while reboot_rx.recv().await.is_some() {
                info!("Reboot imminent");
            }
        });

        Ok(Self {
            checker: Arc::new(Mutex::new(checker)),
            config,
        })
    }

    async fn run(self) -> Result<()> {
        // Set up signal handlers
        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
        let mut sigusr1 =
            signal(SignalKind::user_defined1()).context("Failed to create SIGUSR1 handler")?;
        let mut sigusr2 =
            signal(SignalKind::user_defined2()).context("Failed to create SIGUSR2 handler")?;

        let mut tick_timer = tokio::time::interval(self.config.service.poll_interval);

        info!("Service running");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }

                // SIGUSR1: schedule a reboot after the configured delay
                _ = sigusr1.recv() => {
                    let delay = self.config.service.signal_reboot_delay;
                    let mut checker = self.checker.lock().await;
                    let deadline = checker
                        .scheduler_mut()
                        .schedule_reboot_in(delay, Uptime::now());

                    info!(
                        deadline = %deadline,
                        delay = %format_duration(delay),
                        "Reboot requested via SIGUSR1"
                    );
                }

                // SIGUSR2: schedule a shutdown after the configured delay
                _ = sigusr2.recv() => {
                    let delay = self.config.service.signal_shutdown_delay;
                    let mut checker = self.checker.lock().await;
                    let deadline = checker
                        .scheduler_mut()
                        .schedule_shutdown_in(delay, Uptime::now());

                    info!(
                        deadline = %deadline,
                        delay = %format_duration(delay),
                        "Shutdown requested via SIGUSR2"
                    );
                }

                // Tick timer - check pending power commands
                _ = tick_timer.tick() => {
                    let mut checker = self.checker.lock().await;
                    checker.check_pending_power_commands(Uptime::now());
                }
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "powerctld starting");

    let service = Service::new(&args)?;
    service.run().await
}
