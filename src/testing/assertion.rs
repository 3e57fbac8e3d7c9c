//! Assertions
//!
//! A [`Checker`] compares values and writes one report line per call:
//!
//! ```text
//! <location>:PASS
//! <location>:FAIL: <actual>
//! <location>:OUTPUT: <value>
//! ```
//!
//! A failed check never stops the caller; every check reports on its own.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::debug;

use crate::flows::FlowValue;
use crate::output::OutputSink;

/// Rendering used for a missing value in report lines.
pub const NO_VALUE: &str = "none";

/// Identifies where an assertion was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// `file:line:column` of the code calling this function.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self(format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Location {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// How a value appears in a report line.
pub trait ReportValue {
    fn render(&self) -> String;
}

macro_rules! display_report_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl ReportValue for $t {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_report_value!(i32, i64, u32, u64, usize, f32, f64, bool, char, String, &str, FlowValue);

impl<T: ReportValue> ReportValue for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => NO_VALUE.to_string(),
        }
    }
}

pub fn pass_line(location: &Location) -> String {
    format!("{}:PASS", location)
}

pub fn fail_line(location: &Location, actual: &str) -> String {
    format!("{}:FAIL: {}", location, actual)
}

pub fn output_line(location: &Location, value: &str) -> String {
    format!("{}:OUTPUT: {}", location, value)
}

/// Writes assertion results to a sink and tallies them.
///
/// Clones share the same tally, so a checker can be moved into async
/// test bodies freely.
#[derive(Clone)]
pub struct Checker {
    sink: Arc<dyn OutputSink>,
    passed: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
}

impl Checker {
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            passed: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Compares `actual` with `expected` and reports the outcome.
    ///
    /// Returns true on a match.
    pub fn check<A, E>(&self, actual: A, expected: E, location: impl Into<Location>) -> bool
    where
        A: PartialEq<E> + ReportValue,
    {
        let location = location.into();

        if actual == expected {
            self.passed.fetch_add(1, Ordering::Relaxed);
            self.sink.write(&pass_line(&location), 0);
            true
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
            debug!("Assertion at {} failed", location);
            self.sink.write(&fail_line(&location, &actual.render()), 0);
            false
        }
    }

    /// Like [`Checker::check`], tagged with the caller's source location.
    #[track_caller]
    pub fn check_here<A, E>(&self, actual: A, expected: E) -> bool
    where
        A: PartialEq<E> + ReportValue,
    {
        self.check(actual, expected, Location::caller())
    }

    /// Reports a value for inspection without judging it.
    pub fn output(&self, value: impl ReportValue, location: impl Into<Location>) {
        self.sink
            .write(&output_line(&location.into(), &value.render()), 0);
    }

    pub fn passed(&self) -> usize {
        self.passed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("passed", &self.passed())
            .field("failed", &self.failed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    fn checker() -> (Arc<MemorySink>, Checker) {
        let sink = Arc::new(MemorySink::new());
        (sink.clone(), Checker::new(sink))
    }

    #[test]
    fn test_pass_line() {
        let (sink, check) = checker();
        assert!(check.check(5, 5, "loc:1:1"));
        assert_eq!(sink.lines(), vec!["loc:1:1:PASS"]);
        assert_eq!(check.passed(), 1);
    }

    #[test]
    fn test_fail_line_contains_actual() {
        let (sink, check) = checker();
        assert!(!check.check(43_i64, 42_i64, "hello:39:2"));
        assert_eq!(sink.lines(), vec!["hello:39:2:FAIL: 43"]);
        assert_eq!(check.failed(), 1);
    }

    #[test]
    fn test_failures_do_not_short_circuit() {
        let (sink, check) = checker();
        check.check(1, 2, "a");
        check.check(3, 3, "b");
        check.check("x", "y", "c");

        assert_eq!(sink.lines(), vec!["a:FAIL: 1", "b:PASS", "c:FAIL: x"]);
        assert_eq!(check.passed(), 1);
        assert_eq!(check.failed(), 2);
    }

    #[test]
    fn test_option_rendering() {
        let (sink, check) = checker();
        check.check(None::<i64>, Some(42), "opt");
        check.check(Some(43_i64), Some(43), "opt");

        assert_eq!(sink.lines(), vec!["opt:FAIL: none", "opt:PASS"]);
    }

    #[test]
    fn test_output_line() {
        let (sink, check) = checker();
        check.output(FlowValue::Number(7), "obs:1:1");
        assert_eq!(sink.lines(), vec!["obs:1:1:OUTPUT: 7"]);
        assert_eq!(check.passed() + check.failed(), 0);
    }

    #[test]
    fn test_check_here_uses_caller_location() {
        let (sink, check) = checker();
        check.check_here(true, true);

        let line = &sink.lines()[0];
        assert!(line.starts_with(file!()));
        assert!(line.ends_with(":PASS"));
    }

    #[test]
    fn test_clones_share_tally() {
        let (_sink, check) = checker();
        let clone = check.clone();
        clone.check(1, 1, "x");
        assert_eq!(check.passed(), 1);
    }

    #[test]
    fn test_location_conversions() {
        assert_eq!(Location::from("a:1:2").as_str(), "a:1:2");
        assert_eq!(Location::from("b".to_string()).to_string(), "b");
    }
}
