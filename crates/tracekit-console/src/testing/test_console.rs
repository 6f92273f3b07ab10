//! TestConsole for capturing output in tests
//!
//! Provides a console sink that records every call and captures every
//! written line for assertion instead of writing to stdout/stderr.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracekit_core::ConsoleMethod;

use crate::console::{Console, ConsoleSink, strip_escapes};

/// A console sink that captures output for testing
///
/// Two views are kept: `calls()` returns the raw part lists handed to the
/// sink together with their console method, and `output()` the lines an
/// actual [`Console`] would have written, ANSI codes stripped. Clones share
/// the same buffers, so a clone can be moved into a logger while the
/// original is used for assertions.
pub struct TestConsole {
    inner: Arc<Console>,
    buffer: Arc<Mutex<TestBuffer>>,
}

#[derive(Debug, Default)]
struct TestBuffer {
    /// Every emit call, in order
    calls: Vec<(ConsoleMethod, Vec<String>)>,
    /// Lines with ANSI codes stripped
    lines: Vec<String>,
    /// Lines with ANSI codes preserved
    raw_lines: Vec<String>,
}

impl TestConsole {
    /// Create a new test console that captures output
    #[must_use]
    pub fn new() -> Self {
        let buffer = Arc::new(Mutex::new(TestBuffer::default()));
        let stdout = BufferWriter(buffer.clone());
        let stderr = BufferWriter(buffer.clone());

        // Always colored internally so raw lines keep their escapes
        Self {
            inner: Arc::new(Console::with_writers(stdout, stderr, true)),
            buffer,
        }
    }

    /// Get the underlying console
    #[must_use]
    pub fn console(&self) -> &Console {
        &self.inner
    }

    /// Get every recorded call as (method, parts)
    #[must_use]
    pub fn calls(&self) -> Vec<(ConsoleMethod, Vec<String>)> {
        self.buffer
            .lock()
            .map(|b| b.calls.clone())
            .unwrap_or_default()
    }

    /// Get all captured output (ANSI codes stripped)
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.lines.clone())
            .unwrap_or_default()
    }

    /// Get all captured output (with ANSI codes)
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.raw_lines.clone())
            .unwrap_or_default()
    }

    /// Get output as a single string
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Check if output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        let output = self.output_string().to_lowercase();
        output.contains(&needle.to_lowercase())
    }

    /// Check if output contains all of the given strings
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Check if output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output_string()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert output has specific number of lines
    ///
    /// # Panics
    ///
    /// Panics if the line count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.output().len();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Clear the buffer
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.calls.clear();
            buf.lines.clear();
            buf.raw_lines.clear();
        }
    }

    /// Print output for debugging (in tests)
    pub fn debug_print(&self) {
        eprintln!("=== TestConsole Output ===");
        for (i, line) in self.output().iter().enumerate() {
            eprintln!("{:3}: {}", i + 1, line);
        }
        eprintln!("==========================");
    }
}

impl ConsoleSink for TestConsole {
    fn emit(&self, method: ConsoleMethod, parts: &[String]) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.calls.push((method, parts.to_vec()));
        }
        self.inner.emit(method, parts);
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestConsole {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("call_count", &self.calls().len())
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that captures to a buffer
struct BufferWriter(Arc<Mutex<TestBuffer>>);

impl std::fmt::Debug for BufferWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferWriter").finish_non_exhaustive()
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let s = String::from_utf8_lossy(buf);

        if let Ok(mut buffer) = self.0.lock() {
            // Store raw (with ANSI)
            buffer.raw_lines.extend(s.lines().map(String::from));

            // Store stripped (without ANSI)
            let stripped = strip_escapes(&s);
            buffer.lines.extend(stripped.lines().map(String::from));
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Cloneable in-memory writer, for handing to [`Console::with_writers`]
/// and reading back afterwards.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(tc: &TestConsole, method: ConsoleMethod, parts: &[&str]) {
        let parts: Vec<String> = parts.iter().map(|s| (*s).to_string()).collect();
        tc.emit(method, &parts);
    }

    #[test]
    fn test_output_capture() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["Hello,", "world!"]);
        assert!(tc.contains("Hello"));
        assert!(tc.contains("world"));
        assert_eq!(tc.output(), vec!["Hello, world!"]);
    }

    #[test]
    fn test_calls_recorded_with_method() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Error, &["disk full"]);
        assert_eq!(
            tc.calls(),
            vec![(ConsoleMethod::Error, vec!["disk full".to_string()])]
        );
    }

    #[test]
    fn test_raw_output_keeps_escapes() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["\x1b[32m", "ok", "\x1b[0m"]);
        assert_eq!(tc.raw_output(), vec!["\x1b[32m ok \x1b[0m"]);
        assert_eq!(tc.output(), vec![" ok "]);
    }

    #[test]
    fn test_contains_case_insensitive() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Info, &["Hello World"]);
        assert!(tc.contains("hello"));
        assert!(tc.contains("WORLD"));
    }

    #[test]
    fn test_contains_all() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["The quick brown fox"]);
        assert!(tc.contains_all(&["quick", "brown", "fox"]));
        assert!(!tc.contains_all(&["quick", "lazy"]));
    }

    #[test]
    fn test_assert_not_contains() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["Success"]);
        tc.assert_not_contains("Error");
    }

    #[test]
    fn test_clear() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Warn, &["Some output"]);
        assert!(!tc.output().is_empty());
        tc.clear();
        assert!(tc.output().is_empty());
        assert!(tc.calls().is_empty());
    }

    #[test]
    fn test_line_count() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["Line 1"]);
        emit(&tc, ConsoleMethod::Error, &["Line 2"]);
        tc.assert_line_count(2);
        let output = tc.output_string();
        assert!(output.contains("Line 1"));
        assert!(output.contains("Line 2"));
    }

    #[test]
    fn test_matches_regex() {
        let tc = TestConsole::new();
        emit(&tc, ConsoleMethod::Log, &["Error code: 42"]);
        assert!(tc.matches(r"code: \d+"));
        assert!(!tc.matches(r"code: [a-z]+"));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let tc = TestConsole::new();
        let tc2 = tc.clone();
        emit(&tc2, ConsoleMethod::Log, &["Test"]);
        assert!(tc.contains("Test"));
    }

    #[test]
    fn test_shared_buffer() {
        let mut buf = SharedBuffer::default();
        let reader = buf.clone();
        write!(buf, "abc").unwrap();
        assert_eq!(reader.contents(), "abc");
    }
}
