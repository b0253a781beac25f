//! Integration tests for the process-wide logger, the `log_*!` macros and the
//! `log` crate bridge.
//!
//! These share one global logger, so everything runs in a single test.

mod common;

use common::{capture_logger, message_segments, pairs};
use tildelog::{Color, InitError, Level, log_debug, log_error, log_info, log_warn};

#[test]
fn test_global_logger_macros_and_bridge() {
    let (logger, capture) = capture_logger();
    let global = tildelog::init_with(logger).expect("first install succeeds");
    assert!(std::ptr::eq(global, tildelog::global()));

    let (second, _) = capture_logger();
    assert!(matches!(
        tildelog::init_with(second),
        Err(InitError::AlreadyInitialized)
    ));

    log_error!("Disk", "~a{}~ free", "0 bytes");
    log_warn!("Disk", "low space");
    log_info!("Net", "up");
    log_debug!("Net", "{} peers", 3);

    let lines = capture.lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        pairs(message_segments(&lines[0])),
        vec![(Some(Color::RED), "0 bytes")]
    );
    assert!(lines[3].text().ends_with(" - 3 peers"));

    global.set_level_filter(log::LevelFilter::Warn);
    assert!(!tildelog::is_enabled(Level::Info));
    log_info!("Net", "hidden");
    assert_eq!(capture.lines().len(), 4);

    tildelog::init_log_bridge(Some(log::LevelFilter::Info)).expect("bridge installs");
    assert_eq!(log::max_level(), log::LevelFilter::Info);
    log::info!(target: "bridge", "via ~3log~");
    log::debug!(target: "bridge", "filtered");

    let lines = capture.lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        pairs(message_segments(&lines[4])),
        vec![(Some(Color::WHITE), "via "), (Some(Color::LIGHT_BLUE), "log")]
    );

    global.set_level_filter(log::LevelFilter::Error);
    assert_eq!(log::max_level(), log::LevelFilter::Error);

    assert!(matches!(
        tildelog::init_log_bridge(None),
        Err(InitError::LogBridge(_))
    ));
}
