//! Bedrock gateway adapter
//!
//! Implements the `LlmGateway` port on top of the Bedrock Converse API.
//! Handles AWS credential initialization and one Converse call per request.

use super::config::{BedrockConfig, GenerationDefaults};
use super::model_map;
use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use chat_gateway_application::{GatewayError, LlmGateway};
use chat_gateway_domain::{CompletionRequest, CompletionResult};
use std::sync::Arc;
use tracing::{debug, info};

pub struct BedrockChatGateway {
    client: Arc<BedrockClient>,
    model_id: String,
    defaults: GenerationDefaults,
}

impl BedrockChatGateway {
    /// Create a new Bedrock gateway.
    ///
    /// Resolves AWS credentials and region once.
    pub async fn new(config: &BedrockConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(ref endpoint) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let gateway = Self::from_client(BedrockClient::new(&sdk_config), config);
        info!(
            region = %config.region,
            model = %gateway.model_id,
            "Bedrock gateway initialized"
        );
        gateway
    }

    /// Wrap an already configured client.
    ///
    /// Whatever retry settings the client carries are replaced with
    /// `RetryConfig::disabled()`: each `generate` makes exactly one request
    /// and the chat use case owns retries.
    pub fn from_client(client: BedrockClient, config: &BedrockConfig) -> Self {
        let sdk_config = client
            .config()
            .to_builder()
            .retry_config(RetryConfig::disabled())
            .build();
        Self {
            client: Arc::new(BedrockClient::from_conf(sdk_config)),
            model_id: model_map::resolve_model_id(
                &config.model_id,
                config.cross_region,
                &config.region,
            ),
            defaults: config.defaults.clone(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl LlmGateway for BedrockChatGateway {
    async fn generate(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, GatewayError> {
        // Callers validate first; an invalid request here must still never
        // reach the provider.
        request
            .validate()
            .map_err(|e| GatewayError::InvalidInput(e.to_string()))?;

        let (system, messages) = types::convert_conversation(&request.conversation)?;
        let structured = request.wants_structured_output();

        let mut call = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_system(Some(system))
            .set_messages(Some(messages))
            .inference_config(types::convert_inference_config(
                &request.params,
                &self.defaults,
            ));

        if let Some(ref schema) = request.response_schema {
            call = call.tool_config(types::convert_response_schema(schema)?);
        }

        debug!(
            model = %self.model_id,
            messages = request.conversation.len(),
            structured,
            "Calling Bedrock Converse API"
        );

        let response = call
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        types::convert_converse_output(
            response.output(),
            response.stop_reason(),
            response.usage(),
            structured,
        )
    }

    fn provider_name(&self) -> &str {
        "bedrock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::config::{BehaviorVersion, Credentials, Region};
    use aws_smithy_http_client::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;
    use chat_gateway_domain::{ErrorKind, Message, Role, StopReason};

    const CONVERSE_URI: &str = "https://bedrock-runtime.us-east-1.amazonaws.com/model/m/converse";

    const HI_BODY: &str = r#"{
        "output": {"message": {"role": "assistant", "content": [{"text": "hi"}]}},
        "stopReason": "end_turn",
        "usage": {"inputTokens": 5, "outputTokens": 1, "totalTokens": 6},
        "metrics": {"latencyMs": 42}
    }"#;

    fn converse_event(status: u16, error_type: Option<&str>, body: &str) -> ReplayEvent {
        let mut response = http::Response::builder()
            .status(status)
            .header("content-type", "application/json");
        if let Some(error_type) = error_type {
            response = response.header("x-amzn-errortype", error_type);
        }
        ReplayEvent::new(
            http::Request::builder()
                .method("POST")
                .uri(CONVERSE_URI)
                .body(SdkBody::empty())
                .unwrap(),
            response.body(SdkBody::from(body.to_string())).unwrap(),
        )
    }

    /// A gateway whose client talks to `http_client`. The client is built
    /// with standard SDK retries on, which `from_client` must switch off.
    fn replay_gateway(http_client: &StaticReplayClient) -> BedrockChatGateway {
        let sdk_config = aws_sdk_bedrockruntime::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
            .retry_config(RetryConfig::standard().with_max_attempts(3))
            .http_client(http_client.clone())
            .build();
        BedrockChatGateway::from_client(
            BedrockClient::from_conf(sdk_config),
            &BedrockConfig::default(),
        )
    }

    fn hello() -> CompletionRequest {
        CompletionRequest::new(vec![Message::user("hello")])
    }

    fn offline_gateway(config: &BedrockConfig) -> BedrockChatGateway {
        let sdk_config = aws_sdk_bedrockruntime::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .build();
        BedrockChatGateway::from_client(BedrockClient::from_conf(sdk_config), config)
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected_before_network() {
        let gateway = offline_gateway(&BedrockConfig::default());
        let err = gateway
            .generate(&CompletionRequest::new(Vec::new()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_blank_message_rejected_before_network() {
        let gateway = offline_gateway(&BedrockConfig::default());
        let request = CompletionRequest::new(vec![Message::user("hi"), Message::assistant("")]);
        let err = gateway.generate(&request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cross_region_model_id_resolved_at_construction() {
        let config = BedrockConfig {
            region: "ap-northeast-1".to_string(),
            cross_region: true,
            ..BedrockConfig::default()
        };
        let gateway = offline_gateway(&config);

        assert_eq!(
            gateway.model_id(),
            "ap.anthropic.claude-3-haiku-20240307-v1:0"
        );
        assert_eq!(gateway.provider_name(), "bedrock");
    }

    #[tokio::test]
    async fn test_converse_reply_becomes_assistant_result() {
        let http_client = StaticReplayClient::new(vec![converse_event(200, None, HI_BODY)]);
        let gateway = replay_gateway(&http_client);

        let result = gateway.generate(&hello()).await.unwrap();

        assert_eq!(result.role(), Role::Assistant);
        assert_eq!(result.content(), "hi");
        assert_eq!(result.stop_reason(), Some(&StopReason::EndTurn));
        assert_eq!(result.usage().map(|u| u.total_tokens), Some(6));

        let requests: Vec<_> = http_client.actual_requests().collect();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].uri().ends_with("/converse"));
    }

    #[tokio::test]
    async fn test_throttling_response_is_rate_limited_without_sdk_retry() {
        let http_client = StaticReplayClient::new(vec![converse_event(
            429,
            Some("ThrottlingException"),
            r#"{"message": "Too many requests, please wait before trying again."}"#,
        )]);
        let gateway = replay_gateway(&http_client);

        let err = gateway.generate(&hello()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(http_client.actual_requests().count(), 1);
    }

    #[tokio::test]
    async fn test_unmodeled_503_falls_back_to_status() {
        let http_client = StaticReplayClient::new(vec![converse_event(
            503,
            None,
            r#"{"message": "Service unavailable"}"#,
        )]);
        let gateway = replay_gateway(&http_client);

        let err = gateway.generate(&hello()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
        assert_eq!(http_client.actual_requests().count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_never_sent() {
        let http_client = StaticReplayClient::new(vec![converse_event(200, None, HI_BODY)]);
        let gateway = replay_gateway(&http_client);

        let err = gateway
            .generate(&CompletionRequest::new(Vec::new()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(http_client.actual_requests().count(), 0);
    }
}
