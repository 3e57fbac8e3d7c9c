//! Flows Module
//!
//! The built-in flows and the registry that names them.
//!
//! - [`greeting`]: `hello`, `goodbye` and the default `main` flow
//! - [`countdown`]: The countdown flow
//! - [`registry`]: Name-based lookup and invocation

pub mod countdown;
pub mod greeting;
pub mod registry;

pub use countdown::{countdown, countdown_branch};
pub use greeting::{goodbye, goodbye_branch, hello, run_main, FAREWELL, HELLO_VALUE};
pub use registry::{FlowEntry, FlowFn, FlowRegistry, FlowValue, DEFAULT_FLOW};
