//! Testing Module
//!
//! A minimal harness for checking flows at runtime.
//!
//! - [`assertion`]: Checks and report lines
//! - [`harness`]: Sequential, failure-isolated test groups
//! - [`suite`]: The suite behind `--test`

pub mod assertion;
pub mod harness;
pub mod suite;

pub use assertion::{Checker, Location, ReportValue};
pub use harness::{GroupOutcome, GroupReport, GroupState, SuiteReport, TestSuite};
pub use suite::builtin_suite;
