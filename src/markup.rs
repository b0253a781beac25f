//! Inline color markup scanner.
//!
//! Messages select colors with `~<code>` escapes, where `<code>` is one of
//! the palette codes (`a`-`h`, `1`-`6`):
//!
//! ```text
//! ~aconnection lost~g, retrying in ~45s
//! ```
//!
//! The text after a code runs up to the next `~` (or the end of the
//! message) and is printed in the selected color. Untagged text at the start
//! of a message is printed in the default color (`~g`).
//!
//! ## Scan rules
//!
//! - A `~` followed by an ASCII alphanumeric character is an escape. Unknown
//!   codes keep their payload but do not change the color.
//! - The closing `~` of a payload is only a delimiter. Text between it and
//!   the next escape is consumed while searching and never printed.
//! - A `~` followed by anything else (or nothing) is skipped. A `~` at the
//!   very end of a message is therefore never printed: `"x~"` prints `x`.
//! - If the message itself starts with such a stray `~`, the text up to the
//!   next `~` is printed literally in the default color. `"~"` prints `~`
//!   and `"~~"` also prints a single `~`.

use crate::palette::{Color, DEFAULT_CODE, MARKUP_CHAR};
use std::borrow::Cow;

/// A run of text and the color change that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Color to activate before writing, or `None` to keep the active one
    pub color: Option<Color>,
    pub text: Cow<'a, str>,
}

impl<'a> Segment<'a> {
    pub fn colored(color: Color, text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            color: Some(color),
            text: text.into(),
        }
    }

    pub fn uncolored(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            color: None,
            text: text.into(),
        }
    }
}

/// Split a message into colored segments.
///
/// An empty message yields no segments.
pub fn scan(message: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    if message.is_empty() {
        return segments;
    }

    let default_color = Color::from_code(DEFAULT_CODE);
    let mut pos = 0;

    // Leading untagged text behaves exactly like an explicit `~g` prefix.
    // A leading stray tilde is kept as literal text in the same color.
    let leading_literal = if !message.starts_with(MARKUP_CHAR) {
        Some(0)
    } else if code_after(message, 0).is_none() {
        Some(MARKUP_CHAR.len_utf8())
    } else {
        None
    };
    if let Some(search_from) = leading_literal {
        let end = find_tilde(message, search_from).unwrap_or(message.len());
        segments.push(Segment {
            color: default_color,
            text: Cow::Borrowed(&message[..end]),
        });
        pos = end;
    }

    while let Some(tilde) = find_tilde(message, pos) {
        match code_after(message, tilde) {
            Some(code) => {
                let start = tilde + MARKUP_CHAR.len_utf8() + code.len_utf8();
                let end = find_tilde(message, start).unwrap_or(message.len());
                segments.push(Segment {
                    color: Color::from_code(code),
                    text: Cow::Borrowed(&message[start..end]),
                });
                pos = end;
            }
            None => pos = tilde + MARKUP_CHAR.len_utf8(),
        }
    }

    segments
}

/// The printable text of a message with all markup removed.
pub fn strip(message: &str) -> String {
    scan(message)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

/// Byte offset of the next markup character at or after `from`.
fn find_tilde(message: &str, from: usize) -> Option<usize> {
    message
        .get(from..)?
        .find(MARKUP_CHAR)
        .map(|offset| from + offset)
}

/// The code character following the tilde at `tilde`, if it forms an escape.
fn code_after(message: &str, tilde: usize) -> Option<char> {
    message
        .get(tilde + MARKUP_CHAR.len_utf8()..)?
        .chars()
        .next()
        .filter(char::is_ascii_alphanumeric)
}
