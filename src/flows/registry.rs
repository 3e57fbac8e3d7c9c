//! Flow Registry
//!
//! Maps flow names to invokable entries. The registry is assembled once
//! at startup and only read afterwards; invocation takes plain string
//! arguments and yields an optional [`FlowValue`].

use std::collections::BTreeMap;
use std::fmt;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::info;

use crate::context::FlowContext;
use crate::error::{FlowError, Result};

use super::countdown::countdown;
use super::greeting::{goodbye, hello, run_main};

/// Name of the flow run when none is given.
pub const DEFAULT_FLOW: &str = "main";

/// A value returned by a registered flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for FlowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowValue::Number(n) => write!(f, "{}", n),
            FlowValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FlowValue {
    fn from(value: i64) -> Self {
        FlowValue::Number(value)
    }
}

impl From<&str> for FlowValue {
    fn from(value: &str) -> Self {
        FlowValue::Text(value.to_string())
    }
}

impl From<String> for FlowValue {
    fn from(value: String) -> Self {
        FlowValue::Text(value)
    }
}

/// Future returned by a registered flow.
pub type FlowFuture<'a> = BoxFuture<'a, Result<Option<FlowValue>>>;

/// Signature every registered flow adapts to.
pub type FlowFn = for<'a> fn(&'a FlowContext, &'a [String]) -> FlowFuture<'a>;

/// A registered flow.
#[derive(Clone)]
pub struct FlowEntry {
    pub name: String,
    pub description: String,
    /// Number of arguments the flow expects
    pub arity: usize,
    invoke: FlowFn,
}

impl fmt::Debug for FlowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Named, invokable flows.
#[derive(Debug, Default, Clone)]
pub struct FlowRegistry {
    flows: BTreeMap<String, FlowEntry>,
}

impl FlowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in flows: main, hello, goodbye, countdown.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_FLOW, "Greet the world", 0, invoke_main);
        registry.register("hello", "Greet NAME while counting down; returns 43", 1, invoke_hello);
        registry.register("goodbye", "Say goodbye", 0, invoke_goodbye);
        registry.register("countdown", "Count down with a pause between numbers", 0, invoke_countdown);
        registry
    }

    /// Adds or replaces a flow.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        arity: usize,
        invoke: FlowFn,
    ) {
        let name = name.into();
        self.flows.insert(
            name.clone(),
            FlowEntry {
                name,
                description: description.into(),
                arity,
                invoke,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&FlowEntry> {
        self.flows.get(name)
    }

    /// Registered flow names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.flows.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FlowEntry> {
        self.flows.values()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Invokes a flow by name.
    ///
    /// # Errors
    ///
    /// * `FlowError::UnknownFlow` - No flow with that name
    /// * `FlowError::Arity` - Wrong number of arguments
    /// * Anything the flow itself propagates
    pub async fn invoke(
        &self,
        name: &str,
        ctx: &FlowContext,
        args: &[String],
    ) -> Result<Option<FlowValue>> {
        let entry = self
            .get(name)
            .ok_or_else(|| FlowError::UnknownFlow(name.to_string()))?;

        if args.len() != entry.arity {
            return Err(FlowError::Arity {
                flow: name.to_string(),
                expected: entry.arity,
                got: args.len(),
            });
        }

        info!("Invoking flow '{}' with {:?}", name, args);
        (entry.invoke)(ctx, args).await
    }
}

fn invoke_main<'a>(ctx: &'a FlowContext, _args: &'a [String]) -> FlowFuture<'a> {
    run_main::<FlowValue>(ctx).boxed()
}

fn invoke_hello<'a>(ctx: &'a FlowContext, args: &'a [String]) -> FlowFuture<'a> {
    async move {
        let name = args.first().map(String::as_str).unwrap_or_default();
        Ok(hello(ctx, name).await?.map(FlowValue::from))
    }
    .boxed()
}

fn invoke_goodbye<'a>(ctx: &'a FlowContext, _args: &'a [String]) -> FlowFuture<'a> {
    goodbye::<FlowValue>(ctx).boxed()
}

fn invoke_countdown<'a>(ctx: &'a FlowContext, _args: &'a [String]) -> FlowFuture<'a> {
    countdown::<FlowValue>(ctx).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FlowConfig;
    use crate::output::MemorySink;
    use std::sync::Arc;

    fn context() -> (Arc<MemorySink>, FlowContext) {
        let sink = Arc::new(MemorySink::new());
        let ctx = FlowContext::new(sink.clone(), FlowConfig::default().with_countdown(3, 1));
        (sink, ctx)
    }

    #[test]
    fn test_default_flows_registered() {
        let registry = FlowRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["countdown", "goodbye", "hello", "main"]);
        assert_eq!(registry.get("hello").unwrap().arity, 1);
        assert_eq!(registry.len(), 4);
    }

    #[tokio::test]
    async fn test_invoke_hello() {
        let (sink, ctx) = context();
        let registry = FlowRegistry::with_defaults();

        let value = registry
            .invoke("hello", &ctx, &["world".to_string()])
            .await
            .unwrap();

        assert_eq!(value, Some(FlowValue::Number(43)));
        assert_eq!(sink.position("hello, world!"), Some(0));
    }

    #[tokio::test]
    async fn test_invoke_goodbye_returns_no_value() {
        let (sink, ctx) = context();
        let registry = FlowRegistry::with_defaults();

        assert_eq!(registry.invoke("goodbye", &ctx, &[]).await.unwrap(), None);
        assert_eq!(sink.lines(), vec!["kthxbai."]);
    }

    #[tokio::test]
    async fn test_unknown_flow() {
        let (_sink, ctx) = context();
        let registry = FlowRegistry::with_defaults();

        let err = registry.invoke("missing", &ctx, &[]).await.unwrap_err();
        assert!(matches!(err, FlowError::UnknownFlow(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_wrong_arity() {
        let (sink, ctx) = context();
        let registry = FlowRegistry::with_defaults();

        let err = registry.invoke("hello", &ctx, &[]).await.unwrap_err();
        assert!(matches!(err, FlowError::Arity { expected: 1, got: 0, .. }));
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_register_custom_flow() {
        fn answer<'a>(_ctx: &'a FlowContext, args: &'a [String]) -> FlowFuture<'a> {
            async move { Ok(Some(FlowValue::from(args.join("+")))) }.boxed()
        }

        let (_sink, ctx) = context();
        let mut registry = FlowRegistry::new();
        assert!(registry.is_empty());
        registry.register("join", "Join arguments", 2, answer);

        let value = registry
            .invoke("join", &ctx, &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(value, Some(FlowValue::Text("a+b".to_string())));
        assert_eq!(value.unwrap().to_string(), "a+b");
    }
}
