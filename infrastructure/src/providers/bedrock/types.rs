//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Converts domain conversations to Converse API requests, Converse API
//! responses to domain `CompletionResult`, and Bedrock SDK failures to
//! `GatewayError`.

use super::config::GenerationDefaults;
use aws_sdk_bedrockruntime::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types as bedrock;
use aws_credential_types::provider::error::CredentialsError;
use aws_smithy_types::Document;
use aws_smithy_types::retry::ErrorKind as RetryErrorKind;
use chat_gateway_application::GatewayError;
use chat_gateway_domain::{
    CompletionResult, Conversation, GenerationParams, Message, Role, StopReason, TokenUsage,
};

/// Name of the tool used to force schema-shaped replies.
pub const STRUCTURED_OUTPUT_TOOL: &str = "structured_output";

// ─── Domain → Bedrock ────────────────────────────────────────────

/// Bedrock turn role for a domain role. `System` has no turn role: system
/// instructions go through the dedicated `system` channel.
pub fn convert_role(role: Role) -> Option<bedrock::ConversationRole> {
    match role {
        Role::User => Some(bedrock::ConversationRole::User),
        Role::Assistant => Some(bedrock::ConversationRole::Assistant),
        Role::System => None,
    }
}

/// Split a conversation into Converse `system` blocks and turn messages,
/// preserving order within each.
pub fn convert_conversation(
    conversation: &Conversation,
) -> Result<(Vec<bedrock::SystemContentBlock>, Vec<bedrock::Message>), GatewayError> {
    let mut system = Vec::new();
    let mut messages = Vec::with_capacity(conversation.len());

    for message in conversation.messages() {
        match convert_role(message.role) {
            None => system.push(bedrock::SystemContentBlock::Text(message.content.clone())),
            Some(role) => {
                let turn = bedrock::Message::builder()
                    .role(role)
                    .content(bedrock::ContentBlock::Text(message.content.clone()))
                    .build()
                    .map_err(|e| GatewayError::Unknown(format!("Failed to build message: {e}")))?;
                messages.push(turn);
            }
        }
    }

    Ok((system, messages))
}

/// Merge request parameters over configured defaults.
pub fn convert_inference_config(
    params: &GenerationParams,
    defaults: &GenerationDefaults,
) -> bedrock::InferenceConfiguration {
    let max_tokens = params.max_tokens.unwrap_or(defaults.max_tokens);
    let mut builder = bedrock::InferenceConfiguration::builder()
        .max_tokens(i32::try_from(max_tokens).unwrap_or(i32::MAX))
        .temperature(params.temperature.unwrap_or(defaults.temperature));

    if let Some(top_p) = params.top_p.or(defaults.top_p) {
        builder = builder.top_p(top_p);
    }
    if !params.stop_sequences.is_empty() {
        builder = builder.set_stop_sequences(Some(params.stop_sequences.clone()));
    }

    builder.build()
}

/// Build a tool configuration that forces the model to answer through a
/// single tool whose input schema is `schema`.
pub fn convert_response_schema(
    schema: &serde_json::Value,
) -> Result<bedrock::ToolConfiguration, GatewayError> {
    let spec = bedrock::ToolSpecification::builder()
        .name(STRUCTURED_OUTPUT_TOOL)
        .description("Return the answer as JSON matching the input schema.")
        .input_schema(bedrock::ToolInputSchema::Json(json_to_document(schema)))
        .build()
        .map_err(|e| GatewayError::Unknown(format!("Failed to build tool spec: {e}")))?;

    let choice = bedrock::SpecificToolChoice::builder()
        .name(STRUCTURED_OUTPUT_TOOL)
        .build()
        .map_err(|e| GatewayError::Unknown(format!("Failed to build tool choice: {e}")))?;

    bedrock::ToolConfiguration::builder()
        .tools(bedrock::Tool::ToolSpec(spec))
        .tool_choice(bedrock::ToolChoice::Tool(choice))
        .build()
        .map_err(|e| GatewayError::Unknown(format!("Failed to build tool config: {e}")))
}

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Convert Bedrock stop reason to domain StopReason.
pub fn convert_stop_reason(reason: &bedrock::StopReason) -> StopReason {
    match reason {
        bedrock::StopReason::EndTurn => StopReason::EndTurn,
        bedrock::StopReason::MaxTokens => StopReason::MaxTokens,
        bedrock::StopReason::StopSequence => StopReason::StopSequence,
        bedrock::StopReason::ToolUse => StopReason::ToolUse,
        other => StopReason::Other(other.as_str().to_string()),
    }
}

pub fn convert_usage(usage: &bedrock::TokenUsage) -> TokenUsage {
    let count = |n: i32| u32::try_from(n).unwrap_or(0);
    TokenUsage {
        input_tokens: count(usage.input_tokens()),
        output_tokens: count(usage.output_tokens()),
        total_tokens: count(usage.total_tokens()),
    }
}

/// Convert a Bedrock message back to a domain message, joining its text
/// blocks in order. Returns `None` when the message carries no text.
pub fn convert_message(message: &bedrock::Message) -> Option<Message> {
    let role = match message.role() {
        bedrock::ConversationRole::User => Role::User,
        bedrock::ConversationRole::Assistant => Role::Assistant,
        _ => return None,
    };

    let texts: Vec<&str> = message
        .content()
        .iter()
        .filter_map(|block| match block {
            bedrock::ContentBlock::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(Message::new(role, texts.concat()))
    }
}

/// First tool-use block addressed to the structured output tool.
fn structured_output(message: &bedrock::Message) -> Option<serde_json::Value> {
    message.content().iter().find_map(|block| match block {
        bedrock::ContentBlock::ToolUse(tool_use) if tool_use.name() == STRUCTURED_OUTPUT_TOOL => {
            Some(document_to_json(tool_use.input()))
        }
        _ => None,
    })
}

/// Convert a Converse response to exactly one `CompletionResult`.
///
/// The Converse API answers with a single assistant message; its text
/// blocks form the reply. With `structured` set, the first structured
/// output tool-use block is the reply instead.
pub fn convert_converse_output(
    output: Option<&bedrock::ConverseOutput>,
    stop_reason: &bedrock::StopReason,
    usage: Option<&bedrock::TokenUsage>,
    structured: bool,
) -> Result<CompletionResult, GatewayError> {
    let message = match output {
        Some(bedrock::ConverseOutput::Message(message)) => message,
        Some(other) => {
            return Err(GatewayError::Unknown(format!(
                "Unsupported Bedrock output: {other:?}"
            )));
        }
        None => {
            return Err(GatewayError::Unknown(
                "No output in Bedrock response".to_string(),
            ));
        }
    };

    if *message.role() != bedrock::ConversationRole::Assistant {
        return Err(GatewayError::Unknown(format!(
            "Unexpected Bedrock reply role: {}",
            message.role().as_str()
        )));
    }

    let mut result = if structured {
        let value = structured_output(message).ok_or_else(|| {
            GatewayError::Unknown("Model did not return structured output".to_string())
        })?;
        CompletionResult::structured(value)
    } else {
        let reply = convert_message(message).ok_or_else(|| {
            GatewayError::Unknown("No text content in Bedrock response".to_string())
        })?;
        CompletionResult::new(reply.content)
    };

    result = result.with_stop_reason(convert_stop_reason(stop_reason));
    if let Some(usage) = usage {
        result = result.with_usage(convert_usage(usage));
    }
    Ok(result)
}

// ─── JSON ↔ Document helpers ─────────────────────────────────────

/// Convert a serde_json::Value to an aws_smithy_types::Document.
pub fn json_to_document(value: &serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        serde_json::Value::String(s) => Document::String(s.clone()),
        serde_json::Value::Array(arr) => {
            Document::Array(arr.iter().map(json_to_document).collect())
        }
        serde_json::Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

/// Convert an aws_smithy_types::Document to a serde_json::Value.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    match doc {
        Document::Null => serde_json::Value::Null,
        Document::Bool(b) => serde_json::Value::Bool(*b),
        Document::Number(n) => match n {
            aws_smithy_types::Number::PosInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::NegInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        },
        Document::String(s) => serde_json::Value::String(s.clone()),
        Document::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(document_to_json).collect())
        }
        Document::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// Classify a Bedrock service error.
///
/// Modeled exceptions are matched first; anything else falls back to the
/// error code, then to the HTTP status of the raw response.
pub fn classify_converse_error(err: &ConverseError, status: Option<u16>) -> GatewayError {
    let detail = err.message().unwrap_or("no message").to_string();

    match err {
        ConverseError::AccessDeniedException(_) => GatewayError::Unauthorized(detail),
        ConverseError::ThrottlingException(_) => GatewayError::RateLimited(detail),
        ConverseError::ValidationException(_) => GatewayError::InvalidInput(detail),
        ConverseError::ModelTimeoutException(_) => GatewayError::Timeout,
        ConverseError::ModelNotReadyException(_)
        | ConverseError::ModelErrorException(_)
        | ConverseError::InternalServerException(_) => GatewayError::ProviderUnavailable(detail),
        ConverseError::ResourceNotFoundException(_) => GatewayError::Unknown(detail),
        other => classify_by_code(other.code(), status, detail),
    }
}

fn classify_by_code(code: Option<&str>, status: Option<u16>, detail: String) -> GatewayError {
    match code {
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "ExpiredTokenException"
            | "InvalidSignatureException"
            | "MissingAuthenticationTokenException",
        ) => return GatewayError::Unauthorized(detail),
        Some(
            "ThrottlingException" | "ServiceQuotaExceededException" | "TooManyRequestsException",
        ) => return GatewayError::RateLimited(detail),
        Some(
            "ServiceUnavailableException"
            | "InternalServerException"
            | "ModelNotReadyException"
            | "ModelErrorException",
        ) => return GatewayError::ProviderUnavailable(detail),
        Some("ModelTimeoutException") => return GatewayError::Timeout,
        Some("ValidationException") => return GatewayError::InvalidInput(detail),
        _ => {}
    }

    match status {
        Some(400) => GatewayError::InvalidInput(detail),
        Some(401 | 403) => GatewayError::Unauthorized(detail),
        Some(408) => GatewayError::Timeout,
        Some(429) => GatewayError::RateLimited(detail),
        Some(500..=599) => GatewayError::ProviderUnavailable(detail),
        _ => GatewayError::Unknown(format!("{} ({detail})", code.unwrap_or("unclassified"))),
    }
}

/// Convert a Bedrock SDK error to a GatewayError.
pub fn convert_converse_error(err: &SdkError<ConverseError>) -> GatewayError {
    match err {
        SdkError::ServiceError(service_err) => {
            let status = service_err.raw().status().as_u16();
            classify_converse_error(service_err.err(), Some(status))
        }
        SdkError::TimeoutError(_) => GatewayError::Timeout,
        _ if caused_by_credentials(err) => {
            GatewayError::Unauthorized(format!("AWS credentials unavailable: {err}"))
        }
        SdkError::DispatchFailure(failure) => {
            if failure.is_timeout() {
                GatewayError::Timeout
            } else if failure.is_io() {
                GatewayError::ProviderUnavailable(format!("Bedrock connection failed: {err}"))
            } else {
                match failure.as_other() {
                    Some(RetryErrorKind::TransientError | RetryErrorKind::ServerError) => {
                        GatewayError::ProviderUnavailable(format!(
                            "Bedrock dispatch failure: {err}"
                        ))
                    }
                    Some(RetryErrorKind::ThrottlingError) => {
                        GatewayError::RateLimited(format!("Bedrock dispatch throttled: {err}"))
                    }
                    _ => GatewayError::Unknown(format!("Bedrock dispatch failure: {err}")),
                }
            }
        }
        SdkError::ResponseError(_) => {
            GatewayError::ProviderUnavailable(format!("Malformed Bedrock response: {err}"))
        }
        other => GatewayError::Unknown(format!("Bedrock SDK error: {other}")),
    }
}

/// Whether a credential provider failure appears anywhere in the source chain.
fn caused_by_credentials(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<CredentialsError>() {
            return true;
        }
        current = e.source();
    }
    false
}
