//! Built-in Test Suite
//!
//! The checks run by `flowrunner --test`: one group per feature.

use crate::context::FlowContext;
use crate::flows::{countdown, goodbye, hello, HELLO_VALUE};

use super::assertion::Location;
use super::harness::TestSuite;

/// Builds the suite exercising the built-in flows against `ctx`.
pub fn builtin_suite(ctx: &FlowContext) -> TestSuite<'_> {
    TestSuite::new("flows")
        .group("Hello", move |check| async move {
            check.check_here(hello(ctx, "world").await?, Some(HELLO_VALUE + 1));
            let x = 1.0;
            check.check_here(ctx.config().my_colour.red, x);
            Ok(())
        })
        .group("Goodbye", move |check| async move {
            check.check_here(goodbye::<i64>(ctx).await?, None);
            Ok(())
        })
        .group("Countdown", move |check| async move {
            check.output(ctx.config().countdown.start, Location::caller());
            check.check_here(countdown::<i64>(ctx).await?, None);
            Ok(())
        })
}
