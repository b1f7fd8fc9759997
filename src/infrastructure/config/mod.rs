use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const CONFIG_FILE: &str = "cenarista.toml";
pub const ENV_PREFIX: &str = "CENARISTA_";

/// Deployment configuration: defaults, overridden by `cenarista.toml`,
/// overridden by `CENARISTA_`-prefixed environment variables. The API key
/// is expected to come from the environment; its absence only surfaces
/// later, as a transport failure from the generation client.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            language: "português (Brasil)".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }

    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            ..LLMConfig::default()
        }
    }
}
