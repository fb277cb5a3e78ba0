//! LLM Gateway port
//!
//! Defines the interface for producing a completion from a conversation,
//! independent of which provider serves it.

use async_trait::async_trait;
use chat_gateway_domain::{CompletionRequest, CompletionResult, ErrorKind};
use thiserror::Error;

/// Errors a gateway may return.
///
/// Adapters must translate every provider-specific failure into one of
/// these variants; each maps onto exactly one [`ErrorKind`]. The string
/// payloads are diagnostic detail for logs and never reach HTTP callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unknown provider error: {0}")]
    Unknown(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidInput(_) => ErrorKind::InvalidInput,
            GatewayError::Unauthorized(_) => ErrorKind::Unauthorized,
            GatewayError::RateLimited(_) => ErrorKind::RateLimited,
            GatewayError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            GatewayError::Timeout => ErrorKind::Timeout,
            GatewayError::Unknown(_) => ErrorKind::UnknownProviderError,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }
}

/// Gateway for LLM completions
///
/// This port defines how the application layer asks a provider for a
/// reply. Implementations (adapters) live in the infrastructure layer and
/// make exactly one provider call per invocation; retry policy belongs to
/// the caller.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Produce one completion for the request's conversation.
    async fn generate(&self, request: &CompletionRequest)
    -> Result<CompletionResult, GatewayError>;

    /// Short provider identifier for logs.
    fn provider_name(&self) -> &str;
}
