//! Bounded retry for adapter calls
//!
//! Store adapters wrap their calls in a [`RetryPolicy`] so that transient
//! failures (dropped connections, pool timeouts) get a few more attempts
//! with exponential backoff. Non-transient errors are returned immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::ports::PortError;

/// Retry configuration for transient port failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the first call
    pub max_retries: u32,
    /// Retry delay in milliseconds (exponential backoff base)
    pub retry_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and backoff base
    pub fn new(max_retries: u32, retry_delay_ms: u64) -> Self {
        Self {
            max_retries,
            retry_delay_ms,
        }
    }

    /// Delay before the given retry attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.retry_delay_ms.saturating_mul(factor))
    }

    /// Runs `call`, retrying while it fails with a transient error
    ///
    /// # Arguments
    ///
    /// * `operation` - Name used in log output
    /// * `call` - Produces a fresh future for every attempt
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, PortError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PortError>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}
