//! Concurrent Groups
//!
//! A group starts a fixed, declaration-ordered list of branches together
//! and waits for all of them. All branches are polled from the calling
//! task, so every branch runs up to its first suspension point before any
//! branch is awaited to completion, and no hardware parallelism is
//! involved.
//!
//! # Merge rule
//!
//! The group's value is the first present branch value in **declaration
//! order**, regardless of which branch physically finished first. If no
//! branch produced a value the group yields `None`.
//!
//! # Failures
//!
//! Sibling branches are never cancelled. Every branch runs to its
//! terminal value or its own failure; afterwards the first failure in
//! declaration order is returned and any further failures are logged.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use futures::future::join_all;
use log::{debug, warn};

use crate::error::Result;
use crate::monitoring::{EventType, ExecutionTimeline};

use super::branch::Branch;

/// Returns the first present value, scanning in the given order.
///
/// ```
/// use flowrunner::execution::merge_first_present;
///
/// assert_eq!(merge_first_present(vec![None, Some(2), Some(3)]), Some(2));
/// assert_eq!(merge_first_present(Vec::<Option<i32>>::new()), None);
/// ```
pub fn merge_first_present<T>(results: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    results.into_iter().flatten().next()
}

/// Terminal outcome of one branch within a group.
#[derive(Debug)]
pub struct BranchResult<T> {
    pub branch: String,
    pub result: Result<Option<T>>,
}

/// Everything a group run produced, in declaration order.
#[derive(Debug)]
pub struct GroupReport<T> {
    name: String,
    results: Vec<BranchResult<T>>,
    timeline: ExecutionTimeline,
}

impl<T> GroupReport<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-branch outcomes in declaration order.
    pub fn results(&self) -> &[BranchResult<T>] {
        &self.results
    }

    /// Start/finish events for each branch.
    pub fn timeline(&self) -> &ExecutionTimeline {
        &self.timeline
    }

    /// Applies the failure policy and the declaration-order merge rule.
    pub fn merged(self) -> Result<Option<T>> {
        let mut first_error = None;
        let mut values = Vec::with_capacity(self.results.len());

        for BranchResult { branch, result } in self.results {
            match result {
                Ok(value) => values.push(value),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => warn!(
                    "Group '{}': branch '{}' also failed: {}",
                    self.name, branch, e
                ),
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(merge_first_present(values)),
        }
    }
}

/// A declaration-ordered set of branches started together.
///
/// # Example
///
/// ```
/// use flowrunner::execution::{Branch, CellWrite, ConcurrentGroup};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let group = ConcurrentGroup::new("pair")
///     .branch(Branch::new("quiet").step("noop", |_| async { Ok(CellWrite::Keep) }))
///     .branch(Branch::new("answer").step("set", |_| async { Ok(CellWrite::set(42)) }));
///
/// assert_eq!(group.run().await.unwrap(), Some(42));
/// # });
/// ```
pub struct ConcurrentGroup<'a, T> {
    name: String,
    branches: Vec<Branch<'a, T>>,
}

impl<'a, T> ConcurrentGroup<'a, T>
where
    T: Clone + Send + 'a,
{
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branches: Vec::new(),
        }
    }

    /// Declares the next branch (builder style).
    pub fn branch(mut self, branch: Branch<'a, T>) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Runs every branch to its terminal value and returns the raw outcomes.
    pub async fn run_all(self) -> GroupReport<T> {
        let ConcurrentGroup { name, branches } = self;

        debug!("Starting group '{}' with {} branches", name, branches.len());

        let timeline = Mutex::new(ExecutionTimeline::new());
        let timeline_ref = &timeline;

        let runs = branches.into_iter().map(move |branch| async move {
            let branch_name = branch.name().to_string();
            record(timeline_ref, &branch_name, EventType::Started);

            let result = branch.run().await;

            let event = if result.is_ok() {
                EventType::Completed
            } else {
                EventType::Failed
            };
            record(timeline_ref, &branch_name, event);

            BranchResult {
                branch: branch_name,
                result,
            }
        });

        let results = join_all(runs).await;
        let timeline = timeline.into_inner().unwrap_or_else(PoisonError::into_inner);

        debug!(
            "Group '{}' finished (completion order: {:?})",
            name,
            timeline.completion_order()
        );
        debug!("{}", timeline.gantt_chart());

        GroupReport {
            name,
            results,
            timeline,
        }
    }

    /// Runs the group and merges branch values in declaration order.
    pub async fn run(self) -> Result<Option<T>> {
        self.run_all().await.merged()
    }
}

impl<T> fmt::Debug for ConcurrentGroup<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentGroup")
            .field("name", &self.name)
            .field("branches", &self.branches)
            .finish()
    }
}

fn record(timeline: &Mutex<ExecutionTimeline>, branch: &str, event: EventType) {
    timeline
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .add_event(branch, event);
}
