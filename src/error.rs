//! Typed error types for tildelog.
//!
//! Logging itself never fails from the caller's point of view; these errors
//! only cover installing the process-wide logger.

use thiserror::Error;

/// Errors from installing the global logger or the `log` crate bridge.
#[derive(Debug, Error)]
pub enum InitError {
    /// `init` was called after the global logger already existed.
    #[error("global logger is already initialized")]
    AlreadyInitialized,

    /// Another `log` backend was installed first.
    #[error("failed to install log bridge: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}
