use crate::application::use_cases::analysis::hashing::hash_input;
use crate::application::use_cases::analysis::prompts::build_primary_prompt;
use crate::application::use_cases::analysis::schemas::primary_schema;
use crate::application::use_cases::analysis::types::PrimaryOutput;
use crate::application::use_cases::analysis::AnalysisUseCase;
use crate::application::use_cases::link_context::{derive_context_note, extract_ticket_id};
use crate::application::use_cases::priority::sort_by_priority;
use crate::domain::analysis::{AnalysisRequest, AnalysisResult, TestScenario};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::GenerationClient;

impl AnalysisUseCase {
    pub(super) async fn run_primary_stage(
        &self,
        run_id: &str,
        config: &LLMConfig,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult> {
        let ticket_id = extract_ticket_id(&request.reference_link);
        let context_note = derive_context_note(&request.reference_link);
        let prompt = build_primary_prompt(
            &request.description,
            &context_note,
            &ticket_id,
            &self.language,
        );

        tracing::info!(
            run_id,
            ticket_id = %ticket_id,
            input_digest = %hash_input(&prompt, &config.model),
            "primary analysis stage started"
        );

        let payload = self
            .llm_client
            .generate(config, &prompt, &primary_schema())
            .await?;

        let parsed: PrimaryOutput =
            serde_json::from_value(payload.clone()).map_err(|err| AppError::SchemaViolation {
                detail: format!("primary payload does not match the declared schema: {}", err),
                payload: payload.to_string(),
            })?;

        let mut scenarios: Vec<TestScenario> = parsed
            .scenarios
            .into_iter()
            .map(TestScenario::from)
            .collect();
        sort_by_priority(&mut scenarios);

        tracing::info!(
            run_id,
            scenario_count = scenarios.len(),
            "primary analysis stage complete"
        );

        Ok(AnalysisResult {
            ticket_id,
            primary_scenarios: scenarios,
            impact_notes: parsed.impacts,
            regression_suggestions: parsed.regression_tests,
            regression_scenarios: None,
        })
    }
}
