//! Log line assembly.
//!
//! A line is a timestamp, a source column, a level column and the message:
//!
//! ```text
//! [14:03:27] Net             - INFO     - connected to 10.0.0.2
//! ```
//!
//! [`format_line`] produces the colored segments and [`render`] replays
//! them against a [`TerminalSink`].

use crate::level::Level;
use crate::markup::{self, Segment};
use crate::palette::Color;
use crate::sink::TerminalSink;
use chrono::{NaiveTime, Timelike};
use std::io;

/// Longest message, in characters, that is scanned for markup.
pub const MAX_MESSAGE_LEN: usize = 300;

/// Minimum width of the source column.
pub const SOURCE_WIDTH: usize = 15;

/// Minimum width of the level column.
pub const LEVEL_WIDTH: usize = 8;

/// Build every segment of a log line.
///
/// The message is truncated to [`MAX_MESSAGE_LEN`] characters before markup
/// scanning.
pub fn format_line<'a>(
    level: Level,
    source: &str,
    message: &'a str,
    time: NaiveTime,
) -> Vec<Segment<'a>> {
    let mut segments: Vec<Segment<'a>> = prefix_segments(level, source, time);
    segments.extend(markup::scan(truncate_message(message)));
    segments
}

/// Segments that precede the message: time, source and level columns.
pub fn prefix_segments(level: Level, source: &str, time: NaiveTime) -> Vec<Segment<'static>> {
    vec![
        Segment::colored(Color::GRAY, "["),
        Segment::colored(Color::WHITE, format!("{:02}", time.hour())),
        Segment::colored(Color::GRAY, ":"),
        Segment::colored(Color::WHITE, format!("{:02}", time.minute())),
        Segment::colored(Color::GRAY, ":"),
        Segment::colored(Color::WHITE, format!("{:02}", time.second())),
        Segment::colored(Color::GRAY, "] "),
        Segment::colored(Color::WHITE, pad(source, SOURCE_WIDTH)),
        Segment::colored(Color::GRAY, " - "),
        Segment::colored(level.color(), pad(level.name(), LEVEL_WIDTH)),
        Segment::colored(Color::GRAY, ""),
        Segment::colored(Color::GRAY, " - "),
    ]
}

/// Write segments to a sink in order, then end the line.
///
/// The line is always ended and flushed, even after a failed write, so the
/// next line starts on a fresh row with reset attributes. The first error is
/// returned.
pub fn render(segments: &[Segment<'_>], sink: &mut dyn TerminalSink) -> io::Result<()> {
    let body = write_segments(segments, sink);
    let end = sink.end_line();
    let flush = sink.flush();
    body.and(end).and(flush)
}

fn write_segments(segments: &[Segment<'_>], sink: &mut dyn TerminalSink) -> io::Result<()> {
    for segment in segments {
        if let Some(color) = segment.color {
            sink.set_color(color)?;
        }
        sink.write_text(&segment.text)?;
    }
    Ok(())
}

/// Cut a message to at most [`MAX_MESSAGE_LEN`] characters.
pub fn truncate_message(message: &str) -> &str {
    match message.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((byte_index, _)) => &message[..byte_index],
        None => message,
    }
}

/// Right-pad `text` with spaces to `width` characters. Longer text is kept whole.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(len));
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 9).expect("valid time")
    }

    #[test]
    fn test_timestamp_is_zero_padded() {
        let time = NaiveTime::from_hms_opt(7, 3, 0).expect("valid time");
        let segments = prefix_segments(Level::Info, "X", time);
        assert_eq!(segments[1].text, "07");
        assert_eq!(segments[3].text, "03");
        assert_eq!(segments[5].text, "00");
    }

    #[test]
    fn test_source_padding() {
        for (source, expected_spaces) in [("", 15), ("Net", 12), ("fourteen_chars", 1)] {
            let segments = prefix_segments(Level::Info, source, noon());
            let column = &segments[7].text;
            assert_eq!(column.len(), source.len() + expected_spaces);
            assert!(column.starts_with(source));
        }
    }

    #[test]
    fn test_long_source_is_not_truncated() {
        let source = "a_much_longer_source_tag";
        let segments = prefix_segments(Level::Info, source, noon());
        assert_eq!(segments[7].text, source);
    }

    #[test]
    fn test_level_column() {
        for level in Level::ALL {
            let segments = prefix_segments(level, "X", noon());
            assert_eq!(segments[9].color, Some(level.color()));
            assert_eq!(segments[9].text.len(), LEVEL_WIDTH);
            assert_eq!(segments[9].text.trim_end(), level.name());
        }
    }

    #[test]
    fn test_truncate_message() {
        let long = "x".repeat(310);
        assert_eq!(truncate_message(&long).len(), MAX_MESSAGE_LEN);
        assert_eq!(truncate_message("short"), "short");

        let wide = "é".repeat(305);
        assert_eq!(truncate_message(&wide).chars().count(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_format_line_appends_message_segments() {
        let segments = format_line(Level::Warn, "X", "~1boom", noon());
        assert_eq!(segments.len(), 13);
        assert_eq!(segments[12], Segment::colored(Color::LIGHT_RED, "boom"));
    }
}
