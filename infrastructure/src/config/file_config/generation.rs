//! Default generation parameters from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Sampling temperature, 0.0 to 1.0 (default: 0.7)
    pub temperature: f32,
    /// Max tokens per response (default: 1024)
    pub max_tokens: u32,
    /// Nucleus sampling, 0.0 to 1.0 (default: provider default)
    pub top_p: Option<f32>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            top_p: None,
        }
    }
}
