//! Artificial per-call delay standing in for real I/O.

use std::time::Duration;

/// Delay applied before each store operation.
///
/// `Latency::none()` (the default) never touches the timer, so stores built
/// with it can be driven from any runtime, including ones without time enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    per_call: Duration,
    bulk: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self::default()
    }

    /// Same delay for single and bulk operations.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            per_call: delay,
            bulk: delay,
        }
    }

    /// Override the delay used by bulk operations.
    pub fn with_bulk(mut self, delay: Duration) -> Self {
        self.bulk = delay;
        self
    }

    pub fn per_call(&self) -> Duration {
        self.per_call
    }

    pub fn bulk(&self) -> Duration {
        self.bulk
    }

    pub(crate) async fn wait(&self) {
        sleep_unless_zero(self.per_call).await;
    }

    pub(crate) async fn wait_bulk(&self) {
        sleep_unless_zero(self.bulk).await;
    }
}

async fn sleep_unless_zero(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
