//! Branch Execution
//!
//! A branch is an ordered list of steps run strictly one after another on
//! a single logical thread. Each step receives the value left by the step
//! before it and answers with a [`CellWrite`]; the branch runner applies
//! that write to its private [`ResultCell`].
//!
//! Steps are async, so a step may suspend (for example at a timer wait)
//! without blocking sibling branches that are polled alongside it.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, error};

use crate::error::{FlowError, Result};

use super::cell::{CellWrite, ResultCell};

/// Boxed future returned by a step body.
pub type StepFuture<'a, T> = BoxFuture<'a, Result<CellWrite<T>>>;

type StepFn<'a, T> = Box<dyn FnOnce(Option<T>) -> StepFuture<'a, T> + Send + 'a>;

/// A single named unit of work inside a branch.
pub struct Step<'a, T> {
    name: String,
    run: StepFn<'a, T>,
    exit_on_value: bool,
}

impl<'a, T: Send + 'a> Step<'a, T> {
    /// Creates a step from an async function of the previous value.
    ///
    /// # Example
    ///
    /// ```
    /// use flowrunner::execution::{CellWrite, Step};
    ///
    /// let step = Step::new("increment", |prev: Option<i64>| async move {
    ///     Ok(CellWrite::set(prev.unwrap_or(0) + 1))
    /// });
    /// assert_eq!(step.name(), "increment");
    /// ```
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        Self {
            name: name.into(),
            run: Box::new(move |previous| body(previous).boxed()),
            exit_on_value: false,
        }
    }

    /// Ends the branch right after this step if the cell then holds a value.
    pub fn exit_on_value(mut self) -> Self {
        self.exit_on_value = true;
        self
    }
}

impl<'a, T> Step<'a, T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exits_on_value(&self) -> bool {
        self.exit_on_value
    }
}

impl<T> fmt::Debug for Step<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("exit_on_value", &self.exit_on_value)
            .finish()
    }
}

/// An ordered sequence of steps producing one terminal value.
///
/// The terminal value is whatever the result cell holds after the last
/// step; a branch that never sets the cell yields `None`.
pub struct Branch<'a, T> {
    name: String,
    steps: Vec<Step<'a, T>>,
}

impl<'a, T> Branch<'a, T>
where
    T: Clone + Send + 'a,
{
    /// Creates an empty branch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step built from an async function (builder style).
    pub fn step<F, Fut>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        self.steps.push(Step::new(name, body));
        self
    }

    /// Appends an already-built step.
    pub fn push(&mut self, step: Step<'a, T>) {
        self.steps.push(step);
    }

    /// Inserts a step ahead of every existing step.
    pub fn push_front(&mut self, step: Step<'a, T>) {
        self.steps.insert(0, step);
    }

    /// Drops every step added so far.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Runs every step in order and returns the terminal value.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(v))` - The last value written to the cell
    /// * `Ok(None)` - No step ever wrote to the cell
    /// * `Err(FlowError::StepFailed)` - A step failed; later steps did not run
    pub async fn run(self) -> Result<Option<T>> {
        let Branch { name, steps } = self;
        let total = steps.len();
        let mut cell = ResultCell::new();

        for (index, step) in steps.into_iter().enumerate() {
            let Step {
                name: step_name,
                run,
                exit_on_value,
            } = step;

            debug!(
                "Branch '{}' step {}/{}: {}",
                name,
                index + 1,
                total,
                step_name
            );

            let write = run(cell.snapshot()).await.map_err(|e| {
                error!("Branch '{}' failed at step '{}': {}", name, step_name, e);
                FlowError::StepFailed {
                    branch: name.clone(),
                    step: step_name.clone(),
                    source: Box::new(e),
                }
            })?;

            cell.apply(write);

            if exit_on_value && cell.has_value() {
                debug!(
                    "Branch '{}' exiting early after '{}' produced a value",
                    name, step_name
                );
                break;
            }
        }

        Ok(cell.into_value())
    }
}

impl<T> fmt::Debug for Branch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .finish()
    }
}
