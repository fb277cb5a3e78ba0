//! Completion request types.
//!
//! A [`CompletionRequest`] is what the orchestration service hands to a
//! gateway: the conversation, optional generation parameters, and an
//! optional JSON Schema asking for structured output.

use crate::conversation::entities::Conversation;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_tokens`.
pub const MAX_OUTPUT_TOKENS: u32 = 64_000;

/// Maximum number of stop sequences accepted per request.
pub const MAX_STOP_SEQUENCES: usize = 4;

/// Optional generation parameters.
///
/// `None` means "use the gateway's configured default". Values are passed
/// through to the provider untouched once they pass [`validate`](Self::validate).
///
/// | Field | Valid range |
/// |-------|-------------|
/// | `temperature` | `0.0 ..= 1.0` |
/// | `top_p` | `0.0 ..= 1.0` |
/// | `max_tokens` | `1 ..= 64_000` |
/// | `stop_sequences` | at most 4, none blank |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stop_sequences: Vec<String>,
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stop_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.stop_sequences.push(sequence.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(t) = self.temperature
            && !(0.0..=1.0).contains(&t)
        {
            return Err(DomainError::InvalidParameter(format!(
                "temperature must be between 0.0 and 1.0, got {t}"
            )));
        }
        if let Some(p) = self.top_p
            && !(0.0..=1.0).contains(&p)
        {
            return Err(DomainError::InvalidParameter(format!(
                "top_p must be between 0.0 and 1.0, got {p}"
            )));
        }
        if let Some(n) = self.max_tokens
            && !(1..=MAX_OUTPUT_TOKENS).contains(&n)
        {
            return Err(DomainError::InvalidParameter(format!(
                "max_tokens must be between 1 and {MAX_OUTPUT_TOKENS}, got {n}"
            )));
        }
        if self.stop_sequences.len() > MAX_STOP_SEQUENCES {
            return Err(DomainError::InvalidParameter(format!(
                "at most {MAX_STOP_SEQUENCES} stop sequences are allowed"
            )));
        }
        if self.stop_sequences.iter().any(|s| s.trim().is_empty()) {
            return Err(DomainError::InvalidParameter(
                "stop sequences must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// A request for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub conversation: Conversation,
    pub params: GenerationParams,
    /// JSON Schema the reply must follow. Root must be an object schema.
    pub response_schema: Option<serde_json::Value>,
}

impl CompletionRequest {
    pub fn new(conversation: impl Into<Conversation>) -> Self {
        Self {
            conversation: conversation.into(),
            params: GenerationParams::default(),
            response_schema: None,
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn wants_structured_output(&self) -> bool {
        self.response_schema.is_some()
    }

    /// Validate the conversation, the parameters and the schema, in that order.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.conversation.validate()?;
        self.params.validate()?;
        if let Some(schema) = &self.response_schema {
            validate_response_schema(schema)?;
        }
        Ok(())
    }
}

/// Only object-rooted schemas are accepted for structured output.
pub fn validate_response_schema(schema: &serde_json::Value) -> Result<(), DomainError> {
    let object = schema
        .as_object()
        .ok_or_else(|| DomainError::InvalidSchema("schema must be a JSON object".to_string()))?;

    match object.get("type").and_then(|t| t.as_str()) {
        Some("object") => {}
        _ => {
            return Err(DomainError::InvalidSchema(
                "root schema must have type=object".to_string(),
            ));
        }
    }

    if let Some(properties) = object.get("properties")
        && !properties.is_object()
    {
        return Err(DomainError::InvalidSchema(
            "properties must be an object".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Message;
    use serde_json::json;

    fn hello() -> CompletionRequest {
        CompletionRequest::new(vec![Message::user("hello")])
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(GenerationParams::default().validate().is_ok());
    }

    #[test]
    fn test_temperature_bounds() {
        assert!(GenerationParams::default().with_temperature(0.0).validate().is_ok());
        assert!(GenerationParams::default().with_temperature(1.0).validate().is_ok());
        assert!(matches!(
            GenerationParams::default().with_temperature(1.5).validate(),
            Err(DomainError::InvalidParameter(_))
        ));
        assert!(GenerationParams::default().with_temperature(-0.1).validate().is_err());
    }

    #[test]
    fn test_max_tokens_bounds() {
        assert!(GenerationParams::default().with_max_tokens(0).validate().is_err());
        assert!(GenerationParams::default().with_max_tokens(1).validate().is_ok());
        assert!(
            GenerationParams::default()
                .with_max_tokens(MAX_OUTPUT_TOKENS + 1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_stop_sequences() {
        let blank = GenerationParams::default().with_stop_sequence("  ");
        assert!(blank.validate().is_err());

        let too_many = (0..5).fold(GenerationParams::default(), |p, i| {
            p.with_stop_sequence(format!("stop{i}"))
        });
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_request_validation_order() {
        let request = CompletionRequest::new(Vec::new())
            .with_params(GenerationParams::default().with_temperature(9.0));
        assert_eq!(request.validate(), Err(DomainError::EmptyConversation));
    }

    #[test]
    fn test_schema_must_be_object_rooted() {
        let ok = hello().with_response_schema(json!({
            "type": "object",
            "properties": { "answer": { "type": "string" } },
            "required": ["answer"]
        }));
        assert!(ok.validate().is_ok());
        assert!(ok.wants_structured_output());

        let array_root = hello().with_response_schema(json!({ "type": "array" }));
        assert!(matches!(
            array_root.validate(),
            Err(DomainError::InvalidSchema(_))
        ));

        let not_object = hello().with_response_schema(json!("object"));
        assert!(not_object.validate().is_err());

        let bad_properties =
            hello().with_response_schema(json!({ "type": "object", "properties": [] }));
        assert!(bad_properties.validate().is_err());
    }
}
