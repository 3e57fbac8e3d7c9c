//! Flow Execution Module
//!
//! The execution model behind every flow: branches that thread a result
//! value through sequential steps, concurrent groups that run branches
//! together and merge their values deterministically, and the timer used
//! as a suspension point.
//!
//! # Architecture
//!
//! - [`cell`]: The per-branch result slot
//! - [`branch`]: Sequential step execution
//! - [`group`]: Concurrent branch groups and the merge rule
//! - [`section`]: Building a branch from feature sections
//! - [`timer`]: Suspension points

pub mod branch;
pub mod cell;
pub mod group;
pub mod section;
pub mod timer;

pub use branch::{Branch, Step};
pub use cell::{CellWrite, ResultCell};
pub use group::{merge_first_present, BranchResult, ConcurrentGroup, GroupReport};
pub use section::{compose, Section, SectionModifier};
pub use timer::{wait, wait_ms};
