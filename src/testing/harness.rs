//! Test Harness
//!
//! Runs named test groups strictly one after another. Each group moves
//! through `Pending -> Running -> Done`; an error returned by a group body
//! is caught at the group boundary, logged, and the next group still runs.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, error, info, warn};

use crate::error::Result;
use crate::output::OutputSink;

use super::assertion::Checker;

type GroupBody<'a> = Box<dyn FnOnce(Checker) -> BoxFuture<'a, Result<()>> + Send + 'a>;

/// How a finished group ended.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    /// The body ran to the end (assertions may still have failed)
    Completed,
    /// The body returned an error
    Errored(String),
}

/// Lifecycle of a test group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupState {
    Pending,
    Running,
    Done(GroupOutcome),
}

struct TestGroup<'a> {
    name: String,
    state: GroupState,
    body: Option<GroupBody<'a>>,
}

impl<'a> TestGroup<'a> {
    /// Moves the group to `Running` and hands out its body.
    fn start(&mut self) -> Option<GroupBody<'a>> {
        if self.state != GroupState::Pending {
            return None;
        }
        self.state = GroupState::Running;
        self.body.take()
    }

    fn finish(&mut self, outcome: GroupOutcome) {
        self.state = GroupState::Done(outcome);
    }
}

/// Result of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub outcome: GroupOutcome,
}

/// Result of a whole suite run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    pub name: String,
    pub groups: Vec<GroupReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.groups.iter().map(|g| g.passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.groups.iter().map(|g| g.failed).sum()
    }

    /// Number of groups whose body returned an error.
    pub fn errored(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g.outcome, GroupOutcome::Errored(_)))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }

    /// One line per group followed by a totals line.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        for group in &self.groups {
            let status = match &group.outcome {
                GroupOutcome::Completed => String::new(),
                GroupOutcome::Errored(e) => format!(" (error: {})", e),
            };
            output.push_str(&format!(
                "  {:12} {} passed, {} failed{}\n",
                group.name, group.passed, group.failed, status
            ));
        }

        output.push_str(&format!(
            "Total: {} passed, {} failed, {} group error(s)",
            self.passed(),
            self.failed(),
            self.errored()
        ));
        output
    }
}

/// An ordered collection of named test groups.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use flowrunner::output::MemorySink;
/// use flowrunner::testing::TestSuite;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let sink = Arc::new(MemorySink::new());
/// let mut suite = TestSuite::new("demo")
///     .group("Maths", |check| async move {
///         check.check(2 + 2, 4, "maths:1:1");
///         Ok(())
///     });
///
/// let report = suite.run(sink.clone()).await;
/// assert!(report.is_success());
/// assert_eq!(sink.lines(), vec!["maths:1:1:PASS"]);
/// # });
/// ```
pub struct TestSuite<'a> {
    name: String,
    groups: Vec<TestGroup<'a>>,
}

impl<'a> TestSuite<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Declares the next group (builder style).
    pub fn group<F, Fut>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Checker) -> Fut + Send + 'a,
        Fut: Future<Output = Result<()>> + Send + 'a,
    {
        self.groups.push(TestGroup {
            name: name.into(),
            state: GroupState::Pending,
            body: Some(Box::new(move |checker| body(checker).boxed())),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Current state of every group, in declaration order.
    pub fn states(&self) -> Vec<(&str, &GroupState)> {
        self.groups
            .iter()
            .map(|g| (g.name.as_str(), &g.state))
            .collect()
    }

    /// Runs every pending group in order, writing report lines to `sink`.
    ///
    /// Groups that already ran are skipped.
    pub async fn run(&mut self, sink: Arc<dyn OutputSink>) -> SuiteReport {
        info!(
            "Running test suite '{}' ({} groups)",
            self.name,
            self.groups.len()
        );

        let mut reports = Vec::with_capacity(self.groups.len());

        for group in &mut self.groups {
            let Some(body) = group.start() else {
                warn!("Test group '{}' already ran - skipping", group.name);
                continue;
            };

            debug!("Test group '{}' running", group.name);
            let checker = Checker::new(Arc::clone(&sink));

            let outcome = match body(checker.clone()).await {
                Ok(()) => GroupOutcome::Completed,
                Err(e) => {
                    error!("Test group '{}' failed: {}", group.name, e);
                    GroupOutcome::Errored(e.to_string())
                }
            };

            debug!(
                "Test group '{}' done: {} passed, {} failed",
                group.name,
                checker.passed(),
                checker.failed()
            );

            group.finish(outcome.clone());
            reports.push(GroupReport {
                name: group.name.clone(),
                passed: checker.passed(),
                failed: checker.failed(),
                outcome,
            });
        }

        SuiteReport {
            name: self.name.clone(),
            groups: reports,
        }
    }
}

impl fmt::Debug for TestSuite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("groups", &self.states())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::execution::wait_ms;
    use crate::output::MemorySink;

    #[tokio::test]
    async fn test_error_in_group_does_not_stop_later_groups() {
        let sink = Arc::new(MemorySink::new());
        let mut suite = TestSuite::new("isolation")
            .group("First", |check| async move {
                check.check(1, 1, "first:1");
                Err(FlowError::custom("induced failure"))
            })
            .group("Second", |check| async move {
                wait_ms(1).await;
                check.check(2, 2, "second:1");
                Ok(())
            });

        let report = suite.run(sink.clone()).await;

        assert_eq!(sink.lines(), vec!["first:1:PASS", "second:1:PASS"]);
        assert_eq!(report.errored(), 1);
        assert_eq!(
            report.groups[0].outcome,
            GroupOutcome::Errored("induced failure".to_string())
        );
        assert_eq!(report.groups[1].outcome, GroupOutcome::Completed);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_lines_after_error_are_not_written() {
        let sink = Arc::new(MemorySink::new());
        let mut suite = TestSuite::new("stop").group("Only", |check| async move {
            check.check(1, 1, "before");
            Err::<(), _>(FlowError::custom("stop"))?;
            check.check(2, 2, "after");
            Ok(())
        });

        suite.run(sink.clone()).await;
        assert_eq!(sink.lines(), vec!["before:PASS"]);
    }

    #[tokio::test]
    async fn test_groups_run_sequentially() {
        let sink = Arc::new(MemorySink::new());
        let sink_a: Arc<dyn OutputSink> = sink.clone();
        let sink_b: Arc<dyn OutputSink> = sink.clone();

        let mut suite = TestSuite::new("order")
            .group("A", move |_| async move {
                sink_a.write("a:start", 0);
                wait_ms(20).await;
                sink_a.write("a:end", 0);
                Ok(())
            })
            .group("B", move |_| async move {
                sink_b.write("b", 0);
                Ok(())
            });

        suite.run(sink.clone()).await;
        assert_eq!(sink.lines(), vec!["a:start", "a:end", "b"]);
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let sink = Arc::new(MemorySink::new());
        let mut suite = TestSuite::new("states")
            .group("Ok", |_| async { Ok(()) })
            .group("Bad", |_| async { Err(FlowError::custom("bad")) });

        assert!(suite
            .states()
            .iter()
            .all(|(_, state)| **state == GroupState::Pending));

        suite.run(sink).await;

        let states = suite.states();
        assert_eq!(*states[0].1, GroupState::Done(GroupOutcome::Completed));
        assert_eq!(
            *states[1].1,
            GroupState::Done(GroupOutcome::Errored("bad".to_string()))
        );
    }

    #[tokio::test]
    async fn test_second_run_skips_finished_groups() {
        let sink = Arc::new(MemorySink::new());
        let mut suite = TestSuite::new("once").group("G", |check| async move {
            check.check(true, true, "g");
            Ok(())
        });

        suite.run(sink.clone()).await;
        let again = suite.run(sink.clone()).await;

        assert!(again.groups.is_empty());
        assert_eq!(sink.count("g:PASS"), 1);
    }

    #[tokio::test]
    async fn test_summary_and_totals() {
        let sink = Arc::new(MemorySink::new());
        let mut suite = TestSuite::new("totals").group("Mixed", |check| async move {
            check.check(1, 1, "a");
            check.check(1, 2, "b");
            Ok(())
        });

        let report = suite.run(sink).await;
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.summary().contains("Total: 1 passed, 1 failed, 0 group error(s)"));
        assert!(report.summary().contains("Mixed"));
    }
}
