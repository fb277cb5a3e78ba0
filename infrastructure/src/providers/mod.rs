//! Provider adapters implementing the `LlmGateway` port.

pub mod bedrock;
