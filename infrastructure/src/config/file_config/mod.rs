//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly, validated once at startup, then converted
//! into the adapter and use-case settings.

mod generation;
mod provider;
mod resilience;
mod server;

pub use generation::FileGenerationConfig;
pub use provider::FileProviderConfig;
pub use resilience::FileResilienceConfig;
pub use server::FileServerConfig;

use crate::providers::bedrock::{BedrockConfig, GenerationDefaults};
use chat_gateway_application::{RetryPolicy, RetryPolicyError};
use chat_gateway_domain::GenerationParams;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Bedrock provider settings
    pub provider: FileProviderConfig,
    /// Default generation parameters
    pub generation: FileGenerationConfig,
    /// Timeout and retry settings
    pub resilience: FileResilienceConfig,
}

/// A configuration value that cannot be used to start the gateway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("server.bind is not a socket address: {0}")]
    InvalidBindAddress(String),

    #[error("provider.region must not be empty")]
    EmptyRegion,

    #[error("provider.model_id must not be empty")]
    EmptyModelId,

    #[error("generation: {0}")]
    InvalidGeneration(String),

    #[error("resilience.timeout_seconds must be greater than zero")]
    InvalidTimeout,

    #[error("resilience: {0}")]
    InvalidRetryPolicy(#[from] RetryPolicyError),
}

impl FileConfig {
    /// Validate every section, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.bind_address()?;

        if self.provider.region.trim().is_empty() {
            return Err(ConfigValidationError::EmptyRegion);
        }
        if self.provider.model_id.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelId);
        }

        // Reuse the per-request range checks for the defaults.
        let mut params = GenerationParams::default()
            .with_temperature(self.generation.temperature)
            .with_max_tokens(self.generation.max_tokens);
        if let Some(top_p) = self.generation.top_p {
            params = params.with_top_p(top_p);
        }
        params
            .validate()
            .map_err(|e| ConfigValidationError::InvalidGeneration(e.to_string()))?;

        if self.resilience.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        self.to_retry_policy().validate()?;

        Ok(())
    }

    /// Parsed listen address.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigValidationError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigValidationError::InvalidBindAddress(self.server.bind.clone()))
    }

    /// Settings for the Bedrock adapter.
    pub fn to_bedrock_config(&self) -> BedrockConfig {
        BedrockConfig {
            region: self.provider.region.clone(),
            profile: self.provider.profile.clone(),
            model_id: self.provider.model_id.clone(),
            cross_region: self.provider.cross_region,
            endpoint_url: self.provider.endpoint_url.clone(),
            defaults: GenerationDefaults {
                temperature: self.generation.temperature,
                max_tokens: self.generation.max_tokens,
                top_p: self.generation.top_p,
            },
        }
    }

    /// Timeout and retry settings for the chat use case.
    pub fn to_retry_policy(&self) -> RetryPolicy {
        let r = &self.resilience;
        RetryPolicy::default()
            .with_call_timeout(Duration::from_secs(r.timeout_seconds))
            .with_max_retries(r.max_retries)
            .with_initial_delay(Duration::from_millis(r.initial_backoff_ms))
            .with_max_delay(Duration::from_millis(r.max_backoff_ms))
            .with_multiplier(r.backoff_multiplier)
            .with_jitter_factor(r.jitter_factor)
    }
}
