//! Completion result types.

use crate::conversation::entities::Role;
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// Hit the token limit; the content may be truncated.
    MaxTokens,
    /// One of the requested stop sequences was produced.
    StopSequence,
    /// The model answered through the structured-output tool.
    ToolUse,
    /// Provider-specific stop reason.
    Other(String),
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// The normalized reply to a [`CompletionRequest`](super::request::CompletionRequest).
///
/// Built once per call and never mutated afterwards. `role` is always
/// [`Role::Assistant`]; [`CompletionResult::new`] is the only constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    role: Role,
    content: String,
    structured: Option<serde_json::Value>,
    usage: Option<TokenUsage>,
    stop_reason: Option<StopReason>,
}

impl CompletionResult {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            structured: None,
            usage: None,
            stop_reason: None,
        }
    }

    /// Wrap a structured reply; `content` becomes its compact JSON rendering.
    pub fn structured(value: serde_json::Value) -> Self {
        let mut result = Self::new(value.to_string());
        result.structured = Some(value);
        result
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_stop_reason(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = Some(stop_reason);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn structured_content(&self) -> Option<&serde_json::Value> {
        self.structured.as_ref()
    }

    pub fn usage(&self) -> Option<&TokenUsage> {
        self.usage.as_ref()
    }

    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop_reason.as_ref()
    }
}
