//! Application layer for chat-gateway
//!
//! This crate contains the chat use case, port definitions, and the
//! resilience policy. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetryPolicy, RetryPolicyError};
pub use ports::{
    backoff::{BackoffStrategy, ExponentialBackoff, NoBackoff},
    llm_gateway::{GatewayError, LlmGateway},
};
pub use use_cases::handle_chat::{HandleChatError, HandleChatUseCase};
