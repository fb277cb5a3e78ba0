//! Bedrock adapter settings
//!
//! Built once at startup from the loaded configuration and handed to
//! [`BedrockChatGateway::new`](super::BedrockChatGateway::new). Never read
//! from the environment mid-call.

/// Generation parameters applied when a request leaves them unset.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            top_p: None,
        }
    }
}

/// Immutable settings for the Bedrock adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockConfig {
    /// AWS region hosting the model.
    pub region: String,
    /// Named AWS profile; `None` uses the default credential chain.
    pub profile: Option<String>,
    /// Bedrock model identifier.
    pub model_id: String,
    /// Route through a cross-region inference profile.
    pub cross_region: bool,
    /// Endpoint override (VPC endpoints, local stubs).
    pub endpoint_url: Option<String>,
    pub defaults: GenerationDefaults,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            cross_region: false,
            endpoint_url: None,
            defaults: GenerationDefaults::default(),
        }
    }
}
