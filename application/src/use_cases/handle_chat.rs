//! Handle Chat use case
//!
//! Validates an inbound conversation, asks the [`LlmGateway`] for a
//! completion under a per-call timeout, and retries transient failures
//! with exponential backoff. This is the only place retry policy lives:
//! adapters make one provider call per invocation and the HTTP layer
//! never retries.

use crate::config::RetryPolicy;
use crate::ports::backoff::{BackoffStrategy, ExponentialBackoff};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use chat_gateway_domain::{CompletionRequest, CompletionResult, DomainError, ErrorKind};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while handling a chat request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandleChatError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Gateway failed after {attempts} attempt(s): {source}")]
    Gateway {
        #[source]
        source: GatewayError,
        attempts: u32,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl HandleChatError {
    /// The classified failure kind, if this error has one.
    ///
    /// Cancellation is not a provider outcome and has no kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            HandleChatError::InvalidInput(_) => Some(ErrorKind::InvalidInput),
            HandleChatError::Gateway { source, .. } => Some(source.kind()),
            HandleChatError::Cancelled => None,
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HandleChatError::Cancelled)
    }
}

/// Use case for answering one chat request
///
/// Flow:
/// 1. Validate the request (no gateway call on failure)
/// 2. Call the gateway, bounded by [`RetryPolicy::call_timeout`]
/// 3. Retry `RateLimited` / `ProviderUnavailable` / `Timeout` up to
///    [`RetryPolicy::max_retries`] times, sleeping per the [`BackoffStrategy`]
/// 4. Return the result unchanged, or the last classified error
#[derive(Clone)]
pub struct HandleChatUseCase {
    gateway: Arc<dyn LlmGateway>,
    policy: RetryPolicy,
    backoff: Arc<dyn BackoffStrategy>,
}

impl HandleChatUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, policy: RetryPolicy) -> Self {
        let backoff = Arc::new(ExponentialBackoff::new(policy.clone()));
        Self {
            gateway,
            policy,
            backoff,
        }
    }

    /// Replace the backoff strategy (deterministic delays in tests).
    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Execute the use case. Dropping the returned future cancels any
    /// in-flight gateway call.
    pub async fn execute(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, HandleChatError> {
        self.execute_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Execute the use case, stopping as soon as `token` is cancelled.
    ///
    /// Cancellation interrupts both the in-flight gateway call and any
    /// backoff sleep; no further attempts are made afterwards.
    pub async fn execute_with_cancellation(
        &self,
        request: CompletionRequest,
        token: &CancellationToken,
    ) -> Result<CompletionResult, HandleChatError> {
        request.validate()?;

        info!(
            provider = self.gateway.provider_name(),
            messages = request.conversation.len(),
            structured = request.wants_structured_output(),
            "Handling chat request"
        );

        let max_attempts = self.policy.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(HandleChatError::Cancelled),
                outcome = self.attempt_once(&request) => outcome,
            };

            let error = match outcome {
                Ok(result) => {
                    info!(attempt, "Chat request completed");
                    return Ok(result);
                }
                Err(error) => error,
            };

            let kind = error.kind();
            if !kind.is_transient() || attempt >= max_attempts {
                warn!(attempt, %kind, error = %error, "Chat request failed");
                return Err(HandleChatError::Gateway {
                    source: error,
                    attempts: attempt,
                });
            }

            let delay = self.backoff.delay(attempt - 1, kind);
            warn!(
                attempt,
                max_attempts,
                %kind,
                delay_ms = delay.as_millis() as u64,
                "Transient gateway failure, retrying"
            );

            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(HandleChatError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// One gateway call bounded by the per-call timeout.
    async fn attempt_once(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, GatewayError> {
        debug!(timeout_ms = self.policy.call_timeout.as_millis() as u64, "Calling gateway");
        match tokio::time::timeout(self.policy.call_timeout, self.gateway.generate(request)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(GatewayError::Timeout),
        }
    }
}
