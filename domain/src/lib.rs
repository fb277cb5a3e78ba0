//! Domain layer for chat-gateway
//!
//! This crate contains the conversation model, the completion request and
//! result types, and the error taxonomy shared by every layer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation**: an ordered, non-empty list of role-tagged messages
//! - **CompletionRequest**: a conversation plus optional generation parameters
//! - **CompletionResult**: the assistant reply, with optional token usage
//! - **ErrorKind**: the closed set of ways a chat call can fail

pub mod completion;
pub mod conversation;
pub mod core;

// Re-export commonly used types
pub use completion::{
    request::{CompletionRequest, GenerationParams, MAX_OUTPUT_TOKENS, validate_response_schema},
    response::{CompletionResult, StopReason, TokenUsage},
};
pub use conversation::entities::{Conversation, Message, Role};
pub use self::core::{error::DomainError, error_kind::ErrorKind};
