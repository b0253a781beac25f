//! Terminal sinks: the destinations a formatted line is written to.
//!
//! A sink holds the active color and the output channel. Sinks are not
//! synchronized themselves; the [`Logger`](crate::logger::Logger) owns one
//! behind a mutex for the whole duration of a line.

use crate::palette::Color;
use parking_lot::Mutex;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use tildelog_config::{ColorMode, OutputStream};

/// Environment variable that disables color in [`ColorMode::Auto`].
pub const NO_COLOR_ENV_VAR: &str = "NO_COLOR";

const SGR_RESET: &str = "\x1b[0m";

/// Destination for colored log text.
pub trait TerminalSink: Send {
    /// Make `color` the foreground for subsequent writes.
    fn set_color(&mut self, color: Color) -> io::Result<()>;

    /// Write text in the active color.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Terminate the current line.
    fn end_line(&mut self) -> io::Result<()> {
        self.write_text("\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that renders colors as ANSI SGR escape sequences.
pub struct AnsiSink<W: Write + Send> {
    writer: W,
    current: Option<Color>,
}

impl<W: Write + Send> AnsiSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: None,
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl AnsiSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl AnsiSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalSink for AnsiSink<W> {
    fn set_color(&mut self, color: Color) -> io::Result<()> {
        if self.current == Some(color) {
            return Ok(());
        }
        write!(self.writer, "\x1b[{}m", color.ansi_sgr())?;
        self.current = Some(color);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn end_line(&mut self) -> io::Result<()> {
        self.current = None;
        self.writer.write_all(SGR_RESET.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Sink for outputs without color support; color changes are dropped.
pub struct PlainSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> PlainSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> TerminalSink for PlainSink<W> {
    fn set_color(&mut self, _color: Color) -> io::Result<()> {
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A piece of text together with the color that was active when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSegment {
    /// `None` if no color had been set on the line yet
    pub color: Option<Color>,
    pub text: String,
}

/// One completed line recorded by a [`CaptureSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedLine {
    pub segments: Vec<CapturedSegment>,
}

impl CapturedLine {
    /// Line text without color information.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Default)]
struct CaptureState {
    active: Option<Color>,
    current: Vec<CapturedSegment>,
    lines: Vec<CapturedLine>,
}

/// In-memory sink that records segments and lines.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// logger owns another.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    state: Arc<Mutex<CaptureState>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed lines, oldest first.
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.state.lock().lines.clone()
    }

    /// Segments written since the last completed line.
    pub fn pending(&self) -> Vec<CapturedSegment> {
        self.state.lock().current.clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.active = None;
        state.current.clear();
        state.lines.clear();
    }
}

impl TerminalSink for CaptureSink {
    fn set_color(&mut self, color: Color) -> io::Result<()> {
        self.state.lock().active = Some(color);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut state = self.state.lock();
        let color = state.active;
        state.current.push(CapturedSegment {
            color,
            text: text.to_string(),
        });
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        let mut state = self.state.lock();
        let segments = std::mem::take(&mut state.current);
        state.lines.push(CapturedLine { segments });
        state.active = None;
        Ok(())
    }
}

/// Decide whether a stream should receive color escapes.
pub fn use_color(mode: ColorMode, stream: OutputStream) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let no_color = std::env::var_os(NO_COLOR_ENV_VAR).is_some_and(|v| !v.is_empty());
            let is_terminal = match stream {
                OutputStream::Stdout => io::stdout().is_terminal(),
                OutputStream::Stderr => io::stderr().is_terminal(),
            };
            is_terminal && !no_color
        }
    }
}

/// Build the console sink for a stream and color mode.
pub fn console(mode: ColorMode, stream: OutputStream) -> Box<dyn TerminalSink> {
    let color = use_color(mode, stream);
    log::debug!("Console sink: stream={stream:?} color={color}");
    match (stream, color) {
        (OutputStream::Stdout, true) => Box::new(AnsiSink::stdout()),
        (OutputStream::Stdout, false) => Box::new(PlainSink::new(io::stdout())),
        (OutputStream::Stderr, true) => Box::new(AnsiSink::stderr()),
        (OutputStream::Stderr, false) => Box::new(PlainSink::new(io::stderr())),
    }
}
