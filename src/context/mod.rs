//! Flow Context Module
//!
//! Configuration and the per-run context handed to every flow.
//!
//! - [`model`]: Configuration data structures (Colour, FlowConfig)
//! - [`parser`]: YAML loading and validation

pub mod model;
pub mod parser;

use std::sync::Arc;

use crate::output::{ConsoleSink, OutputSink};

pub use model::{Colour, CountdownConfig, FlowConfig};
pub use parser::{load_config, parse_config, validate_config};

/// What every flow invocation can reach: the output sink and the
/// read-only configuration. Cloning is cheap.
#[derive(Clone)]
pub struct FlowContext {
    sink: Arc<dyn OutputSink>,
    config: Arc<FlowConfig>,
}

impl FlowContext {
    pub fn new(sink: Arc<dyn OutputSink>, config: FlowConfig) -> Self {
        Self {
            sink,
            config: Arc::new(config),
        }
    }

    /// Context writing to stdout with default configuration.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink::new()), FlowConfig::default())
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn sink(&self) -> &Arc<dyn OutputSink> {
        &self.sink
    }

    /// Writes one line to the output sink.
    pub fn output(&self, text: &str, indent: usize) {
        self.sink.write(text, indent);
    }
}

impl std::fmt::Debug for FlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
