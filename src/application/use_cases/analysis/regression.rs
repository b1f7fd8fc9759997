use crate::application::use_cases::analysis::hashing::hash_input;
use crate::application::use_cases::analysis::prompts::build_regression_conversion_prompt;
use crate::application::use_cases::analysis::schemas::conversion_schema;
use crate::application::use_cases::analysis::types::ScenarioOutput;
use crate::application::use_cases::analysis::AnalysisUseCase;
use crate::application::use_cases::priority::sort_by_priority;
use crate::domain::analysis::{AnalysisResult, TestScenario};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::GenerationClient;

impl AnalysisUseCase {
    pub(super) async fn run_regression_stage(
        &self,
        run_id: &str,
        config: &LLMConfig,
        stage_one: &AnalysisResult,
    ) -> Result<Vec<TestScenario>> {
        let prompt = build_regression_conversion_prompt(
            &stage_one.regression_suggestions,
            &stage_one.ticket_id,
            &self.language,
        );

        tracing::info!(
            run_id,
            input_digest = %hash_input(&prompt, &config.model),
            "regression conversion stage started"
        );

        let payload = self
            .llm_client
            .generate(config, &prompt, &conversion_schema())
            .await?;

        // An object payload here means the endpoint ignored the declared
        // array schema; transport succeeded but the result is unusable.
        if !payload.is_array() {
            return Err(AppError::SchemaViolation {
                detail: "regression payload is not an array".to_string(),
                payload: payload.to_string(),
            });
        }

        let parsed: Vec<ScenarioOutput> =
            serde_json::from_value(payload.clone()).map_err(|err| AppError::SchemaViolation {
                detail: format!(
                    "regression payload does not match the declared schema: {}",
                    err
                ),
                payload: payload.to_string(),
            })?;

        let mut scenarios: Vec<TestScenario> =
            parsed.into_iter().map(TestScenario::from).collect();
        sort_by_priority(&mut scenarios);

        tracing::info!(
            run_id,
            scenario_count = scenarios.len(),
            "regression conversion stage complete"
        );

        Ok(scenarios)
    }
}
