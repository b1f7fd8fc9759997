use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::SchemaDescriptor;
use super::GenerationClient;
use crate::domain::error::{AppError, Result, GENERIC_GENERATION_ERROR};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::response::{clean_llm_response, strip_code_fence};

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize, Default)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &LLMConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Transport {
                status: None,
                message: "Chave de API do serviço de geração ausente.".to_string(),
            })
    }

    /// Service errors carry an optional `message`; anything else falls back
    /// to the generic localized string.
    fn transport_message(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_GENERATION_ERROR.to_string())
    }

    /// Decode the nested text payload into the schema-shaped value.
    fn decode_payload(schema: &SchemaDescriptor, text: &str) -> Result<Value> {
        let cleaned = strip_code_fence(&clean_llm_response(text));

        let value: Value =
            serde_json::from_str(&cleaned).map_err(|err| AppError::SchemaViolation {
                detail: format!("payload is not valid JSON: {}", err),
                payload: text.to_string(),
            })?;

        if !schema.matches(&value) {
            return Err(AppError::SchemaViolation {
                detail: "payload root shape does not match the declared schema".to_string(),
                payload: text.to_string(),
            });
        }

        Ok(value)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        config: &LLMConfig,
        prompt: &str,
        schema: &SchemaDescriptor,
    ) -> Result<Value> {
        let api_key = Self::api_key(config)?;
        let base_url = config.base_url.trim_end_matches('/');
        let url = format!(
            "{}/{}:generateContent?key={}",
            base_url, config.model, api_key
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.as_json().clone(),
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        };

        tracing::debug!(model = %config.model, "calling generation endpoint");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                status: None,
                message: format!("Falha na comunicação com o serviço de geração: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Transport {
                status: Some(status),
                message: Self::transport_message(&text),
            });
        }

        let envelope: GeminiResponse = response.json().await.map_err(|_| AppError::EmptyResponse)?;
        let payload = envelope
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.clone())
            .ok_or(AppError::EmptyResponse)?;

        Self::decode_payload(schema, &payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_transport_message_uses_service_message() {
        let body = "{\"message\": \"API key not valid\"}";
        assert_eq!(GeminiClient::transport_message(body), "API key not valid");
    }

    #[test]
    fn test_transport_message_falls_back_to_generic() {
        assert_eq!(
            GeminiClient::transport_message("<html>bad gateway</html>"),
            GENERIC_GENERATION_ERROR
        );
        assert_eq!(
            GeminiClient::transport_message("{}"),
            GENERIC_GENERATION_ERROR
        );
    }

    #[test]
    fn test_missing_api_key_is_transport_failure() {
        let config = LLMConfig::default();
        let error = GeminiClient::api_key(&config).unwrap_err();
        assert!(matches!(
            error,
            AppError::Transport { status: None, .. }
        ));
    }

    #[test]
    fn test_decode_payload_accepts_matching_shape() {
        let schema = SchemaDescriptor::array(json!({ "type": "ARRAY" }));
        let value = GeminiClient::decode_payload(&schema, "[{\"a\": 1}]").unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn test_decode_payload_strips_code_fence() {
        let schema = SchemaDescriptor::object(json!({ "type": "OBJECT" }));
        let value =
            GeminiClient::decode_payload(&schema, "```json\n{\"scenarios\": []}\n```").unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn test_decode_payload_rejects_invalid_json() {
        let schema = SchemaDescriptor::object(json!({ "type": "OBJECT" }));
        let error = GeminiClient::decode_payload(&schema, "sem json aqui").unwrap_err();
        match error {
            AppError::SchemaViolation { payload, .. } => {
                assert_eq!(payload, "sem json aqui")
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_payload_rejects_wrong_shape() {
        let schema = SchemaDescriptor::array(json!({ "type": "ARRAY" }));
        let error = GeminiClient::decode_payload(&schema, "{\"scenarios\": []}").unwrap_err();
        assert!(matches!(error, AppError::SchemaViolation { .. }));
    }
}
