//! Output Sinks
//!
//! Every user-facing line goes through an [`OutputSink`]. The console
//! sink prints to stdout; the memory sink records lines so tests can
//! inspect exactly what a flow produced and in which order.

use std::sync::{Mutex, PoisonError};

/// Destination for indented lines of text.
///
/// Implementations must not fail; a sink that cannot write drops the line.
pub trait OutputSink: Send + Sync {
    /// Emits one line, left-padded by `indent` spaces.
    fn write(&self, text: &str, indent: usize);
}

/// Formats a line the way every sink emits it.
pub fn indent_line(text: &str, indent: usize) -> String {
    format!("{}{}", " ".repeat(indent), text)
}

/// Writes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for ConsoleSink {
    fn write(&self, text: &str, indent: usize) {
        println!("{}", indent_line(text, indent));
    }
}

/// Records lines in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times `line` was written.
    pub fn count(&self, line: &str) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|l| l.as_str() == line)
            .count()
    }

    /// Position of the first occurrence of `line`, if any.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .position(|l| l == line)
    }

    /// Discards all recorded lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl OutputSink for MemorySink {
    fn write(&self, text: &str, indent: usize) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(indent_line(text, indent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_line() {
        assert_eq!(indent_line("x", 0), "x");
        assert_eq!(indent_line("x", 3), "   x");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.write("first", 0);
        sink.write("second", 2);

        assert_eq!(sink.lines(), vec!["first", "  second"]);
        assert_eq!(sink.position("  second"), Some(1));
    }

    #[test]
    fn test_memory_sink_count_and_clear() {
        let sink = MemorySink::new();
        sink.write("again", 0);
        sink.write("again", 0);
        assert_eq!(sink.count("again"), 2);

        sink.clear();
        assert!(sink.lines().is_empty());
        assert_eq!(sink.position("again"), None);
    }

    #[test]
    fn test_sink_as_trait_object() {
        let sink: Box<dyn OutputSink> = Box::new(ConsoleSink::new());
        sink.write("console line", 1);
    }
}
