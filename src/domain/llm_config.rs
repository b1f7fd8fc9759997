use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_output_tokens: Some(8192),
            temperature: Some(0.4),
        }
    }
}
