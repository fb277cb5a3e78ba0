//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetryPolicy`]: per-call timeout and bounded exponential backoff

pub mod retry_policy;

pub use retry_policy::{RetryPolicy, RetryPolicyError};
