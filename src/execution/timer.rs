//! Timer
//!
//! Suspension points for branches. Waiting yields to the runtime, so
//! sibling branches polled in the same group keep making progress.

use std::time::Duration;

use log::trace;

/// Suspends the calling branch for at least `duration`.
pub async fn wait(duration: Duration) {
    trace!("Suspending for {:?}", duration);
    tokio::time::sleep(duration).await;
}

/// Suspends the calling branch for at least `millis` milliseconds.
pub async fn wait_ms(millis: u64) {
    wait(Duration::from_millis(millis)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_wait_elapses_at_least_duration() {
        let start = Instant::now();
        wait_ms(20).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_zero_wait_returns() {
        wait(Duration::ZERO).await;
    }
}
