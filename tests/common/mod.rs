//! Shared integration test helpers for tildelog.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::capture_logger;
//! ```

#![allow(dead_code)]

use tildelog::sink::{CapturedLine, CapturedSegment};
use tildelog::{CaptureSink, Color, Logger};

/// Creates a logger that records into a [`CaptureSink`] and prints every level.
///
/// The returned sink shares its buffer with the one owned by the logger.
pub fn capture_logger() -> (Logger, CaptureSink) {
    let capture = CaptureSink::new();
    let logger = Logger::new(Box::new(capture.clone()), log::LevelFilter::Debug);
    (logger, capture)
}

/// Number of segments every line starts with (time, source and level columns).
pub const PREFIX_SEGMENTS: usize = 12;

/// Segments of a captured line that come from the message.
pub fn message_segments(line: &CapturedLine) -> &[CapturedSegment] {
    &line.segments[PREFIX_SEGMENTS..]
}

/// `(color, text)` pairs for compact assertions.
pub fn pairs(segments: &[CapturedSegment]) -> Vec<(Option<Color>, &str)> {
    segments
        .iter()
        .map(|s| (s.color, s.text.as_str()))
        .collect()
}
