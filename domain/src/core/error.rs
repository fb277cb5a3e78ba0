//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
///
/// Every variant describes a caller mistake; the orchestration layer
/// reports all of them under [`ErrorKind::InvalidInput`](super::error_kind::ErrorKind).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Conversation must contain at least one message")]
    EmptyConversation,

    #[error("Message {index} has empty content")]
    EmptyContent { index: usize },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Invalid generation parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),
}
