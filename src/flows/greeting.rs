//! Greeting Flows
//!
//! `hello` greets, says goodbye and counts down concurrently:
//!
//! ```text
//! hello(name)
//! ├── greeting branch: Hello (on)  -> write "hello, <name>!", set 42
//! │                    Goodbye (after) -> goodbye(), set previous + 1
//! └── countdown branch (never sets a value)
//! ```
//!
//! The group merges in declaration order, so `hello` returns 43 however
//! the countdown is scheduled.

use crate::context::FlowContext;
use crate::error::Result;
use crate::execution::{compose, Branch, CellWrite, ConcurrentGroup, Section};

use super::countdown::countdown_branch;

/// Value set by the Hello section.
pub const HELLO_VALUE: i64 = 42;

/// Line written by `goodbye`.
pub const FAREWELL: &str = "kthxbai.";

/// Greets `name` while a countdown runs alongside; yields 43.
pub async fn hello(ctx: &FlowContext, name: &str) -> Result<Option<i64>> {
    let greeting = compose(
        "greeting",
        [
            Section::on("Hello", move |_| async move {
                ctx.output(&format!("hello, {}!", name), 0);
                Ok(CellWrite::set(HELLO_VALUE))
            }),
            Section::after("Goodbye", move |previous: Option<i64>| async move {
                goodbye::<i64>(ctx).await?;
                Ok(match previous {
                    Some(value) => CellWrite::set(value + 1),
                    None => CellWrite::Keep,
                })
            }),
        ],
    );

    ConcurrentGroup::new("hello")
        .branch(greeting)
        .branch(countdown_branch(ctx))
        .run()
        .await
}

/// Builds the farewell as a single-step branch.
pub fn goodbye_branch<T>(ctx: &FlowContext) -> Branch<'_, T>
where
    T: Clone + Send + 'static,
{
    Branch::new("goodbye").step("Goodbye", move |_| async move {
        ctx.output(FAREWELL, 0);
        Ok(CellWrite::Keep)
    })
}

/// Writes the farewell line; never yields a value.
pub async fn goodbye<T>(ctx: &FlowContext) -> Result<Option<T>>
where
    T: Clone + Send + 'static,
{
    goodbye_branch(ctx).run().await
}

/// Default entry flow: greets "world" and discards the result.
pub async fn run_main<T>(ctx: &FlowContext) -> Result<Option<T>>
where
    T: Clone + Send + 'static,
{
    Branch::new("main")
        .step("Hello", move |_| async move {
            hello(ctx, "world").await?;
            Ok(CellWrite::Keep)
        })
        .run()
        .await
}
