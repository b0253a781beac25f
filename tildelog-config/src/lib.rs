//! Configuration system for the tildelog console logger.
//!
//! This crate provides configuration loading, saving, and default values
//! for the logger. It includes:
//!
//! - The level threshold that decides which severities are printed
//! - Color mode selection (auto-detect, forced on, forced off)
//! - Output stream selection (stdout or stderr)
//! - YAML persistence and environment variable overrides

pub mod config;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{COLOR_ENV_VAR, Config, LEVEL_ENV_VAR};
pub use error::ConfigError;
pub use types::{ColorMode, LogLevel, OutputStream};
