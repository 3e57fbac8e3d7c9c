//! Countdown Flow
//!
//! Writes the numbers from the configured start down to 1, pausing after
//! each one. It never sets its result cell, so it always yields no value
//! and can sit in any concurrent group without affecting the merged result.

use crate::context::FlowContext;
use crate::error::Result;
use crate::execution::{wait_ms, Branch, CellWrite};

/// Builds the countdown as a branch, ready to be placed in a group.
pub fn countdown_branch<T>(ctx: &FlowContext) -> Branch<'_, T>
where
    T: Clone + Send + 'static,
{
    let settings = ctx.config().countdown.clone();

    Branch::new("countdown").step("Countdown", move |_| async move {
        for i in (1..=settings.start).rev() {
            ctx.output(&i.to_string(), 0);
            wait_ms(settings.interval_ms).await;
        }
        Ok(CellWrite::Keep)
    })
}

/// Runs the countdown on its own.
pub async fn countdown<T>(ctx: &FlowContext) -> Result<Option<T>>
where
    T: Clone + Send + 'static,
{
    countdown_branch(ctx).run().await
}
