//! FlowRunner - Concurrent Flow Sections
//!
//! A small engine for running named flows built from sections. Sections
//! run sequentially inside a branch, threading a result value from step
//! to step; branches run concurrently inside a group, and the group's
//! result is the first value in declaration order, never the first to
//! arrive.
//!
//! # Architecture
//!
//! - [`execution`]: Branches, concurrent groups, section composition, timers
//! - [`flows`]: The built-in flows and the flow registry
//! - [`context`]: Configuration and the context passed to flows
//! - [`testing`]: Assertion reporting and the test-group harness
//! - [`output`]: Line-oriented output sinks
//! - [`monitoring`]: Branch timelines for group runs
//!
//! # Example
//!
//! ```rust,no_run
//! use flowrunner::context::FlowContext;
//! use flowrunner::flows::hello;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = FlowContext::console();
//!     let value = hello(&ctx, "world").await?;
//!     assert_eq!(value, Some(43));
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod execution;
pub mod flows;
pub mod monitoring;
pub mod output;
pub mod testing;

// Re-export commonly used types
pub use context::{load_config, FlowConfig, FlowContext};
pub use error::{FlowError, Result};
pub use execution::{Branch, CellWrite, ConcurrentGroup};
pub use flows::{FlowRegistry, FlowValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "FlowRunner";
