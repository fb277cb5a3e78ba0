//! JSON request and response bodies for the HTTP surface.
//!
//! Only this module knows the wire shape; everything past it works with
//! domain types.

use chat_gateway_domain::{
    CompletionRequest, CompletionResult, DomainError, GenerationParams, Message, Role, StopReason,
    TokenUsage,
};
use serde::{Deserialize, Serialize};

/// One message as sent by the client. The role is kept as a string so an
/// unknown role surfaces as `InvalidInput` instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub role: String,
    pub content: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequestDto {
    pub messages: Vec<MessageDto>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub stop_sequences: Vec<String>,
    /// JSON Schema the reply must conform to.
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
}

impl TryFrom<ChatRequestDto> for CompletionRequest {
    type Error = DomainError;

    fn try_from(dto: ChatRequestDto) -> Result<Self, Self::Error> {
        let messages = dto
            .messages
            .into_iter()
            .map(|m| Ok(Message::new(m.role.parse::<Role>()?, m.content)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        let params = GenerationParams {
            temperature: dto.temperature,
            top_p: dto.top_p,
            max_tokens: dto.max_tokens,
            stop_sequences: dto.stop_sequences,
        };

        let mut request = CompletionRequest::new(messages).with_params(params);
        if let Some(schema) = dto.schema {
            request = request.with_response_schema(schema);
        }
        Ok(request)
    }
}

/// Body of a successful `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponseDto {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl From<CompletionResult> for ChatResponseDto {
    fn from(result: CompletionResult) -> Self {
        Self {
            role: result.role(),
            content: result.content().to_string(),
            json: result.structured_content().cloned(),
            usage: result.usage().copied(),
            stop_reason: result.stop_reason().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> ChatRequestDto {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_minimal_request_converts() {
        let dto = parse(json!({"messages": [{"role": "user", "content": "hello"}]}));
        let request = CompletionRequest::try_from(dto).unwrap();

        assert_eq!(request.conversation.messages(), &[Message::user("hello")]);
        assert_eq!(request.params, GenerationParams::default());
        assert!(!request.wants_structured_output());
    }

    #[test]
    fn test_parameters_and_schema_carried_over() {
        let dto = parse(json!({
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ],
            "temperature": 0.1,
            "max_tokens": 64,
            "stop_sequences": ["END"],
            "schema": {"type": "object", "properties": {"answer": {"type": "string"}}}
        }));
        let request = CompletionRequest::try_from(dto).unwrap();

        assert_eq!(request.conversation.len(), 2);
        assert_eq!(request.params.temperature, Some(0.1));
        assert_eq!(request.params.max_tokens, Some(64));
        assert_eq!(request.params.stop_sequences, vec!["END".to_string()]);
        assert!(request.wants_structured_output());
    }

    #[test]
    fn test_unknown_role_is_domain_error() {
        let dto = parse(json!({"messages": [{"role": "tool", "content": "x"}]}));
        assert_eq!(
            CompletionRequest::try_from(dto).unwrap_err(),
            DomainError::UnknownRole("tool".to_string())
        );
    }

    #[test]
    fn test_plain_response_omits_optional_fields() {
        let body =
            serde_json::to_value(ChatResponseDto::from(CompletionResult::new("hi"))).unwrap();
        assert_eq!(body, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn test_structured_response_includes_json_and_usage() {
        let result = CompletionResult::structured(json!({"answer": 42}))
            .with_usage(TokenUsage::new(10, 5))
            .with_stop_reason(StopReason::ToolUse);
        let body = serde_json::to_value(ChatResponseDto::from(result)).unwrap();

        assert_eq!(body["json"], json!({"answer": 42}));
        assert_eq!(body["content"], json!("{\"answer\":42}"));
        assert_eq!(body["usage"]["total_tokens"], json!(15));
        assert_eq!(body["stop_reason"], json!("tool_use"));
    }
}
