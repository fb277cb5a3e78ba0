//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// AWS Bedrock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// AWS region for Bedrock models (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials (default: credential chain)
    pub profile: Option<String>,
    /// Bedrock model identifier
    pub model_id: String,
    /// Use a cross-region inference profile (default: false)
    pub cross_region: bool,
    /// Endpoint override, e.g. a VPC endpoint
    pub endpoint_url: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            cross_region: false,
            endpoint_url: None,
        }
    }
}
