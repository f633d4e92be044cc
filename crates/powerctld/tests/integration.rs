//! Integration tests for powerctld
//!
//! These tests verify the end-to-end behavior of the checker against the
//! mock platform, plus configuration loading.

use powerctl_config::{parse_config, ResetBackendKind};
use powerctl_core::{Deadline, PowerCommandChecker, RebootNotice, TeardownSequence};
use powerctl_platform::{
    new_step_log, MockApiServer, MockBusDriver, MockDisplay, MockInputDriver, MockPowerManager,
    MockReset, PlatformCapabilities, ResetMechanism,
};
use powerctl_util::Uptime;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_full_reboot_flow_with_teardown() {
    let log = new_step_log();
    let teardown = TeardownSequence::new()
        .with_api_server(Box::new(MockApiServer::new(log.clone())))
        .with_input_driver(Box::new(MockInputDriver::new(log.clone())))
        .with_bus_driver(Box::new(MockBusDriver::new("spi", log.clone())))
        .with_bus_driver(Box::new(MockBusDriver::new("i2c", log.clone())))
        .with_display(Box::new(MockDisplay::new(log.clone())));

    let backend = Arc::new(MockReset::with_capabilities(PlatformCapabilities::host()));
    let power = Arc::new(MockPowerManager::new());
    let mut checker =
        PowerCommandChecker::new(backend.clone(), power.clone()).with_teardown(teardown);
    let mut reboot_rx = checker.subscribe_reboot();

    let now = Uptime::from_millis(10_000);
    checker
        .scheduler_mut()
        .schedule_reboot_in(Duration::from_secs(3), now);

    // Not yet due
    checker.check_pending_power_commands(now + Duration::from_secs(2));
    assert_eq!(backend.reset_count(), 0);
    assert!(reboot_rx.try_recv().is_err());

    // Due: notification, teardown in order, one reset
    checker.check_pending_power_commands(now + Duration::from_secs(3));
    assert_eq!(reboot_rx.try_recv(), Ok(RebootNotice));
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "api-server".to_string(),
            "input".to_string(),
            "bus:spi".to_string(),
            "bus:i2c".to_string(),
            "display".to_string(),
        ]
    );
    assert_eq!(backend.reset_count(), 1);
    assert_eq!(power.shutdown_count(), 0);
}

#[test]
fn test_shutdown_delivered_at_most_once() {
    let backend = Arc::new(MockReset::with_capabilities(PlatformCapabilities::host()));
    let power = Arc::new(MockPowerManager::new());
    let mut checker = PowerCommandChecker::new(backend, power.clone());

    let now = Uptime::from_millis(0);
    checker
        .scheduler_mut()
        .schedule_shutdown_in(Duration::from_secs(1), now);

    checker.check_pending_power_commands(now + Duration::from_secs(1));
    assert_eq!(power.shutdown_count(), 1);
    assert_eq!(checker.scheduler().shutdown_deadline(), Deadline::Unset);

    // Repeated polls do not re-deliver
    for extra in [1_001, 1_002, 60_000] {
        checker.check_pending_power_commands(Uptime::from_millis(extra));
    }
    assert_eq!(power.shutdown_count(), 1);
}

#[test]
fn test_unsupported_platform_drops_reboot_request() {
    let backend = Arc::new(MockReset::with_capabilities(
        PlatformCapabilities::unsupported(),
    ));
    let power = Arc::new(MockPowerManager::new());
    let mut checker = PowerCommandChecker::new(backend.clone(), power.clone());

    checker
        .scheduler_mut()
        .schedule_reboot_at(Uptime::from_millis(5));
    checker.check_pending_power_commands(Uptime::from_millis(10));

    assert_eq!(checker.scheduler().reboot_deadline(), Deadline::Disabled);
    assert_eq!(backend.reset_count(), 0);

    // The shutdown path still works afterwards
    checker
        .scheduler_mut()
        .schedule_shutdown_at(Uptime::from_millis(20));
    checker.check_pending_power_commands(Uptime::from_millis(20));
    assert_eq!(power.shutdown_count(), 1);
}

#[test]
fn test_reboot_preempts_simultaneous_shutdown() {
    let backend = Arc::new(MockReset::with_capabilities(PlatformCapabilities::instant(
        ResetMechanism::Watchdog,
    )));
    let power = Arc::new(MockPowerManager::new());
    let mut checker = PowerCommandChecker::new(backend.clone(), power.clone());

    checker
        .scheduler_mut()
        .schedule_reboot_at(Uptime::from_millis(100));
    checker
        .scheduler_mut()
        .schedule_shutdown_at(Uptime::from_millis(100));

    checker.check_pending_power_commands(Uptime::from_millis(100));

    assert_eq!(backend.reset_count(), 1);
    assert_eq!(power.shutdown_count(), 0);
}

#[test]
fn test_cancellation_before_deadline() {
    let backend = Arc::new(MockReset::new());
    let power = Arc::new(MockPowerManager::new());
    let mut checker = PowerCommandChecker::new(backend.clone(), power.clone());

    let now = Uptime::from_millis(0);
    checker
        .scheduler_mut()
        .schedule_reboot_in(Duration::from_secs(5), now);
    checker
        .scheduler_mut()
        .schedule_shutdown_in(Duration::from_secs(5), now);

    checker.scheduler_mut().cancel_reboot();
    checker.scheduler_mut().cancel_shutdown();

    checker.check_pending_power_commands(now + Duration::from_secs(10));
    assert_eq!(backend.reset_count(), 0);
    assert_eq!(power.shutdown_count(), 0);
}

#[test]
fn test_config_parsing() {
    let config = r#"
        config_version = 1

        [service]
        poll_interval_ms = 250
        signal_reboot_delay_ms = 5000

        [platform]
        reset_backend = "watchdog"
        watchdog_device = "/dev/watchdog0"
    "#;

    let config = parse_config(config).unwrap();
    assert_eq!(config.platform.reset_backend, ResetBackendKind::Watchdog);
    assert_eq!(
        config.platform.watchdog_device.as_deref(),
        Some(std::path::Path::new("/dev/watchdog0"))
    );
    assert_eq!(config.service.poll_interval, Duration::from_millis(250));
    assert_eq!(
        config.service.signal_reboot_delay,
        Duration::from_millis(5_000)
    );
    // Unspecified keys keep their defaults
    assert_eq!(
        config.service.signal_shutdown_delay,
        Duration::from_millis(3_000)
    );
}

#[test]
fn test_config_file_loading() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "config_version = 1").unwrap();
    writeln!(file, "[platform]").unwrap();
    writeln!(file, "reset_backend = \"none\"").unwrap();

    let config = powerctl_config::load_config(file.path()).unwrap();
    assert_eq!(config.platform.reset_backend, ResetBackendKind::None);
}
