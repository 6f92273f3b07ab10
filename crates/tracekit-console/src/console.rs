//! Console sink
//!
//! Every trace line ends up here as a list of parts plus the console method
//! it was requested with. [`Console`] joins the parts with single spaces,
//! like a JavaScript-style `console.log(a, b, c)`, and writes the line to
//! stdout or stderr depending on the method.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use regex::Regex;
use time::{OffsetDateTime, format_description};
use tracekit_core::{ConsoleMethod, TraceError, TraceResult};

use crate::config::TraceConfig;

/// Destination of composed trace lines.
///
/// [`Console`] is the real implementation; tests use
/// [`TestConsole`](crate::testing::TestConsole).
pub trait ConsoleSink: Send + Sync {
    /// Writes one line made of `parts` with the given console method.
    fn emit(&self, method: ConsoleMethod, parts: &[String]);
}

type Writer = Mutex<Box<dyn Write + Send>>;

/// Console writing trace lines to stdout/stderr
pub struct Console {
    stdout: Writer,
    stderr: Writer,
    colored: bool,
    timestamps: bool,
}

impl Console {
    /// Create with automatic color detection
    #[must_use]
    pub fn new() -> Self {
        Self::with_color(crate::detection::should_enable_color())
    }

    /// Create with explicit color enable/disable
    #[must_use]
    pub fn with_color(colored: bool) -> Self {
        Self::with_writers(io::stdout(), io::stderr(), colored)
    }

    /// Create from a configuration
    #[must_use]
    pub fn from_config(config: &TraceConfig) -> Self {
        Self::with_color(config.use_color()).with_timestamps(config.timestamps)
    }

    /// Create with custom writers (for testing)
    #[must_use]
    pub fn with_writers<O, E>(stdout: O, stderr: E, colored: bool) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            stdout: Mutex::new(Box::new(stdout)),
            stderr: Mutex::new(Box::new(stderr)),
            colored,
            timestamps: false,
        }
    }

    /// Toggle the `[HH:MM:SS]` prefix
    #[must_use]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Check if color escapes are kept
    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// Check if lines carry a timestamp
    pub fn has_timestamps(&self) -> bool {
        self.timestamps
    }

    // ─────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────

    /// Join parts into the line that would be written
    #[must_use]
    pub fn format_line(&self, parts: &[String]) -> String {
        let mut line = parts.join(" ");
        if !self.colored {
            line = strip_escapes(&line);
        }
        if self.timestamps {
            if let Some(ts) = timestamp() {
                line = format!("[{ts}] {line}");
            }
        }
        line
    }

    /// Print text on stdout, bypassing composition
    pub fn print_plain(&self, text: &str) {
        let text = if self.colored {
            text.to_string()
        } else {
            strip_escapes(text)
        };
        Self::write_line(&self.stdout, &text);
    }

    fn write_line(writer: &Writer, line: &str) {
        // One write per line so capturing writers never see a split line
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        if let Ok(mut out) = writer.lock() {
            let _ = out.write_all(&bytes);
            let _ = out.flush();
        }
    }
}

impl ConsoleSink for Console {
    fn emit(&self, method: ConsoleMethod, parts: &[String]) {
        let line = self.format_line(parts);
        let writer = if method.is_stderr() {
            &self.stderr
        } else {
            &self.stdout
        };
        Self::write_line(writer, &line);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("colored", &self.colored)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────
// Global Console Accessor
// ─────────────────────────────────────────────────────────

static CONSOLE: OnceLock<Arc<Console>> = OnceLock::new();

/// Get the global console instance
#[must_use]
pub fn console() -> &'static Arc<Console> {
    CONSOLE.get_or_init(|| Arc::new(Console::new()))
}

/// Initialize the global console with specific settings
/// Must be called before any output; returns error if already initialized
pub fn init_console(console: Console) -> TraceResult<&'static Arc<Console>> {
    CONSOLE
        .set(Arc::new(console))
        .map_err(|_| TraceError::AlreadyInitialized)?;
    Ok(self::console())
}

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn escape_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").ok())
        .as_ref()
}

/// Strip ANSI escape sequences from text (for plain output)
///
/// Only CSI sequences are removed; tabs and other control characters that
/// are part of a trace line are kept.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    match escape_pattern() {
        Some(pattern) => pattern.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

fn timestamp() -> Option<String> {
    let now = OffsetDateTime::now_utc();
    let fmt = format_description::parse("[hour]:[minute]:[second]").ok()?;
    now.format(&fmt).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SharedBuffer;

    fn parts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_strip_escapes_simple() {
        assert_eq!(strip_escapes("\x1b[32mHello\x1b[0m"), "Hello");
    }

    #[test]
    fn test_strip_escapes_keeps_tabs() {
        assert_eq!(
            strip_escapes("\x1b[32m\tMETHOD 'deposit' passed args:\t [50]\x1b[0m"),
            "\tMETHOD 'deposit' passed args:\t [50]"
        );
        assert_eq!(strip_escapes("\x1b[1;31m\t\tSetting\x1b[0m"), "\t\tSetting");
    }

    #[test]
    fn test_plain_emit_keeps_tabs() {
        let out = SharedBuffer::default();
        let console = Console::with_writers(out.clone(), io::sink(), false);
        console.emit(
            ConsoleMethod::Log,
            &parts(&["\x1b[36m\t\tGetting value from 'total':\t", "42\x1b[0m"]),
        );
        assert_eq!(out.contents(), "\t\tGetting value from 'total':\t 42\n");
    }

    #[test]
    fn test_strip_escapes_no_codes() {
        assert_eq!(strip_escapes("Plain text"), "Plain text");
        assert_eq!(strip_escapes(""), "");
    }

    #[test]
    fn test_format_line_joins_with_spaces() {
        let console = Console::with_writers(io::sink(), io::sink(), true);
        assert_eq!(
            console.format_line(&parts(&["VARIABLE count: ", "42"])),
            "VARIABLE count:  42"
        );
    }

    #[test]
    fn test_format_line_keeps_escapes_when_colored() {
        let console = Console::with_writers(io::sink(), io::sink(), true);
        let line = console.format_line(&parts(&["\x1b[32m", "ok", "\x1b[0m"]));
        assert_eq!(line, "\x1b[32m ok \x1b[0m");
    }

    #[test]
    fn test_format_line_strips_escapes_when_plain() {
        let console = Console::with_writers(io::sink(), io::sink(), false);
        let line = console.format_line(&parts(&["\x1b[32m", "ok", "\x1b[0m"]));
        assert_eq!(line, " ok ");
    }

    #[test]
    fn test_format_line_timestamp_prefix() {
        let console = Console::with_writers(io::sink(), io::sink(), false).with_timestamps(true);
        let line = console.format_line(&parts(&["hello"]));
        let re = regex::Regex::new(r"^\[\d{2}:\d{2}:\d{2}\] hello$").unwrap();
        assert!(re.is_match(&line), "unexpected line: {line}");
    }

    #[test]
    fn test_emit_routes_by_method() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let console = Console::with_writers(out.clone(), err.clone(), false);

        console.emit(ConsoleMethod::Log, &parts(&["to stdout"]));
        console.emit(ConsoleMethod::Error, &parts(&["to stderr"]));
        console.emit(ConsoleMethod::Warn, &parts(&["also stderr"]));

        assert_eq!(out.contents(), "to stdout\n");
        assert_eq!(err.contents(), "to stderr\nalso stderr\n");
    }

    #[test]
    fn test_print_plain_strips_when_plain() {
        let out = SharedBuffer::default();
        let console = Console::with_writers(out.clone(), io::sink(), false);
        console.print_plain("\x1b[31mred\x1b[0m");
        assert_eq!(out.contents(), "red\n");
    }

    #[test]
    fn test_console_flags() {
        let console = Console::with_writers(io::sink(), io::sink(), true);
        assert!(console.is_colored());
        assert!(!console.has_timestamps());
    }

    #[test]
    fn test_global_console_is_shared() {
        assert!(Arc::ptr_eq(console(), console()));
    }
}
