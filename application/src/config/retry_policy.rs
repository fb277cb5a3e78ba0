//! Retry policy: resilience parameters for the chat use case.
//!
//! [`RetryPolicy`] groups the static parameters that bound a chat call:
//! the per-attempt timeout, how many extra attempts transient failures
//! get, and the shape of the exponential backoff between them.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Invalid resilience settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetryPolicyError {
    #[error("call timeout must be greater than zero")]
    ZeroTimeout,

    #[error("jitter_factor must be between 0.0 and 1.0, got {0}")]
    InvalidJitter(f64),

    #[error("multiplier must be at least 1 + jitter_factor ({min}), got {actual}")]
    MultiplierTooSmall { min: f64, actual: f64 },

    #[error("max_delay must not be shorter than initial_delay")]
    MaxBelowInitial,
}

/// Timeout and bounded-retry parameters.
///
/// The delay before retry `n` (0-based) is
/// `min(initial_delay * multiplier^n * (1 + jitter_factor * sample), max_delay)`
/// with `sample` in `[0, 1)`. Requiring `multiplier >= 1 + jitter_factor`
/// keeps successive delays non-decreasing whatever the samples are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Deadline for a single gateway call.
    pub call_timeout: Duration,
    /// Additional attempts after the first one, for transient failures only.
    pub max_retries: u32,
    /// Base delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
    /// Fraction of the computed delay added as random jitter.
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
            multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_jitter_factor(mut self, jitter: f64) -> Self {
        self.jitter_factor = jitter;
        self
    }

    /// Total number of gateway calls a request may make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), RetryPolicyError> {
        if self.call_timeout.is_zero() {
            return Err(RetryPolicyError::ZeroTimeout);
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(RetryPolicyError::InvalidJitter(self.jitter_factor));
        }
        let min = 1.0 + self.jitter_factor;
        if !(self.multiplier >= min) {
            return Err(RetryPolicyError::MultiplierTooSmall {
                min,
                actual: self.multiplier,
            });
        }
        if self.max_delay < self.initial_delay {
            return Err(RetryPolicyError::MaxBelowInitial);
        }
        Ok(())
    }

    /// Delay before retry `retry` (0-based) for a given jitter sample in `[0, 1)`.
    ///
    /// Pure: the same inputs always produce the same delay.
    pub fn delay_for(&self, retry: u32, jitter_sample: f64) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let sample = jitter_sample.clamp(0.0, 1.0);
        let jittered = base * (1.0 + self.jitter_factor * sample);
        Duration::try_from_secs_f64(jittered)
            .map(|delay| delay.min(self.max_delay))
            .unwrap_or(self.max_delay)
    }
}
