//! Monitoring Module
//!
//! Observability for concurrent group runs.
//!
//! - [`ExecutionTimeline`]: Branch start/finish timing and completion order

pub mod timeline;

pub use timeline::{EventType, ExecutionTimeline, TimelineEvent};
