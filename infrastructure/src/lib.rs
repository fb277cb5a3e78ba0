//! Infrastructure layer for chat-gateway
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use providers::bedrock::{BedrockChatGateway, BedrockConfig, GenerationDefaults};
