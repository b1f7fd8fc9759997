pub mod gemini;
pub mod schema;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use schema::SchemaDescriptor;

pub use gemini::GeminiClient;

/// Seam over the text-generation endpoint. The orchestrator owns retry
/// policy (there is none); implementations classify every failure and
/// return only payloads matching the descriptor's root shape.
#[async_trait]
pub trait GenerationClient {
    async fn generate(
        &self,
        config: &LLMConfig,
        prompt: &str,
        schema: &SchemaDescriptor,
    ) -> Result<Value>;
}
