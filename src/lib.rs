// Library exports for tildelog
//
// # Mutex Usage Policy
//
//   - `parking_lot::Mutex` guards the terminal sink inside `Logger`. It is held
//     for one whole line (prefix, markup runs, line end, flush) and must never be
//     held while calling back into the `log` crate, since the bridge routes
//     `log::*!` records into the same lock.
//
//   - `parking_lot::RwLock` holds the level threshold so readers on the hot path
//     never contend with each other.

#[macro_use]
pub mod logger;

pub mod cli;
pub mod error;
pub mod level;
pub mod line;
pub mod markup;
pub mod palette;
pub mod sink;

pub use error::InitError;
pub use level::Level;
pub use logger::{Logger, global, init, init_log_bridge, init_with, is_enabled, log, logf};
pub use markup::Segment;
pub use palette::Color;
pub use sink::{AnsiSink, CaptureSink, PlainSink, TerminalSink};
pub use tildelog_config::{ColorMode, Config, LogLevel, OutputStream};
