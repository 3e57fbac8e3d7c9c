//! Output Module
//!
//! The line-oriented sink that flows and the test harness write to.
//!
//! - [`sink`]: The [`OutputSink`] trait with console and in-memory sinks

pub mod sink;

pub use sink::{ConsoleSink, MemorySink, OutputSink};
