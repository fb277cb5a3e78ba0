//! Configuration file loading for chat-gateway
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHAT_GATEWAY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./chat-gateway.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/chat-gateway/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGenerationConfig, FileProviderConfig,
    FileResilienceConfig, FileServerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
