//! Backoff port
//!
//! Decides how long the chat use case waits before retrying a transient
//! failure. Injectable so tests can run without real sleeps.

use crate::config::RetryPolicy;
use chat_gateway_domain::ErrorKind;
use rand::Rng;
use std::time::Duration;

/// Strategy mapping `(retry index, failure kind)` to a delay.
pub trait BackoffStrategy: Send + Sync {
    /// Delay before retry `retry` (0 for the first retry).
    fn delay(&self, retry: u32, kind: ErrorKind) -> Duration;
}

/// Exponential backoff with random jitter, shaped by a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    policy: RetryPolicy,
}

impl ExponentialBackoff {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn delay(&self, retry: u32, kind: ErrorKind) -> Duration {
        if !kind.is_transient() {
            return Duration::ZERO;
        }
        let sample = rand::thread_rng().gen_range(0.0..1.0);
        self.policy.delay_for(retry, sample)
    }
}

/// Retry immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackoff;

impl BackoffStrategy for NoBackoff {
    fn delay(&self, _retry: u32, _kind: ErrorKind) -> Duration {
        Duration::ZERO
    }
}
