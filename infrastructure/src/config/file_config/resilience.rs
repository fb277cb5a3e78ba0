//! Timeout and retry configuration from TOML (`[resilience]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResilienceConfig {
    /// Deadline for a single provider call, in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Extra attempts for transient failures (default: 2)
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds (default: 250)
    pub initial_backoff_ms: u64,
    /// Upper bound for any retry delay, in milliseconds (default: 4000)
    pub max_backoff_ms: u64,
    /// Growth factor between retry delays (default: 2.0)
    pub backoff_multiplier: f64,
    /// Random jitter as a fraction of the delay (default: 0.2)
    pub jitter_factor: f64,
}

impl Default for FileResilienceConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 4000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}
