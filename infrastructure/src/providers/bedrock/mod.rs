//! AWS Bedrock Converse API provider
//!
//! Provides access to Bedrock-hosted models via AWS IAM authentication
//! through the Bedrock Converse API.

mod adapter;
mod config;
mod model_map;
pub mod types;

pub use adapter::BedrockChatGateway;
pub use config::{BedrockConfig, GenerationDefaults};
