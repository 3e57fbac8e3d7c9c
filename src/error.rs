//! Error Types
//!
//! A single error enum shared by the engine, the flow registry,
//! configuration loading and the test harness.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors raised while building or running flows.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A step inside a branch failed; the branch stopped at that step.
    #[error("step '{step}' in branch '{branch}' failed: {source}")]
    StepFailed {
        branch: String,
        step: String,
        #[source]
        source: Box<FlowError>,
    },

    /// No flow with this name is registered.
    #[error("unknown flow '{0}'")]
    UnknownFlow(String),

    /// A registered flow was invoked with the wrong number of arguments.
    #[error("flow '{flow}' expects {expected} argument(s), got {got}")]
    Arity {
        flow: String,
        expected: usize,
        got: usize,
    },

    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for `FlowConfig`.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Failure raised by user-supplied step or test code.
    #[error("{0}")]
    Custom(String),
}

impl FlowError {
    /// Creates a free-form error, typically from inside a step body.
    pub fn custom(message: impl Into<String>) -> Self {
        FlowError::Custom(message.into())
    }

    /// Returns the innermost error, unwrapping nested step failures.
    pub fn root_cause(&self) -> &FlowError {
        match self {
            FlowError::StepFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
