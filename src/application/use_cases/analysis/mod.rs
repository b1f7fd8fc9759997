mod hashing;
mod primary;
mod prompts;
mod regression;
mod schemas;
mod types;

use std::sync::{Arc, Mutex};

use uuid::Uuid;
use validator::Validate;

use crate::domain::analysis::{AnalysisOutcome, AnalysisRequest, RunState};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::GenerationClient;

use hashing::normalize_language;

/// Two-stage analysis orchestrator: primary ticket analysis, then an
/// optional conversion of the regression suggestions into scenarios.
///
/// One run at a time: a new run is rejected until the previous one reaches
/// a terminal state, and every run rebuilds its result from scratch.
pub struct AnalysisUseCase {
    llm_client: Arc<dyn GenerationClient + Send + Sync>,
    language: String,
    state: Mutex<RunState>,
}

impl AnalysisUseCase {
    pub fn new(llm_client: Arc<dyn GenerationClient + Send + Sync>, language: &str) -> Self {
        Self {
            llm_client,
            language: normalize_language(language),
            state: Mutex::new(RunState::Idle),
        }
    }

    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap()
    }

    fn set_state(&self, next: RunState) {
        *self.state.lock().unwrap() = next;
    }

    /// Atomic check-and-set: moves to `Validating` only when no other run
    /// is in flight.
    fn begin_run(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.accepts_new_run() {
            return false;
        }
        *state = RunState::Validating;
        true
    }

    pub async fn execute(&self, config: &LLMConfig, request: AnalysisRequest) -> AnalysisOutcome {
        if !self.begin_run() {
            return AnalysisOutcome::failure(AppError::Validation(
                "Já existe uma análise em andamento. Aguarde a conclusão.".to_string(),
            ));
        }

        let run_id = Uuid::new_v4().to_string();
        tracing::info!(run_id = %run_id, "analysis run started");

        let outcome = self.run(&run_id, config, &request).await;

        match outcome.error.as_ref() {
            Some(error) => {
                self.set_state(RunState::Errored);
                tracing::warn!(run_id = %run_id, error = %error, "analysis run failed");
            }
            None => {
                self.set_state(RunState::Complete);
                tracing::info!(run_id = %run_id, "analysis run complete");
            }
        }

        outcome
    }

    async fn run(
        &self,
        run_id: &str,
        config: &LLMConfig,
        request: &AnalysisRequest,
    ) -> AnalysisOutcome {
        if let Err(error) = validate_request(request) {
            return AnalysisOutcome::failure(error);
        }

        self.set_state(RunState::Stage1Running);
        let mut result = match self.run_primary_stage(run_id, config, request).await {
            Ok(result) => result,
            Err(error) => return AnalysisOutcome::failure(error),
        };
        self.set_state(RunState::Stage1Done);

        // Empty suggestions skip stage 2 entirely; that is success, not an
        // error, and regression_scenarios stays None.
        if result.regression_suggestions.trim().is_empty() {
            return AnalysisOutcome::success(result);
        }

        self.set_state(RunState::Stage2Running);
        match self.run_regression_stage(run_id, config, &result).await {
            Ok(scenarios) => {
                result.regression_scenarios = Some(scenarios);
                AnalysisOutcome::success(result)
            }
            // Stage-2 failure must not discard what stage 1 produced.
            Err(error) => AnalysisOutcome::partial(result, error),
        }
    }
}

fn validate_request(request: &AnalysisRequest) -> Result<()> {
    if request.reference_link.trim().is_empty() {
        return Err(AppError::Validation("Informe o link do ticket.".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Informe a descrição do ticket ou anexe um documento.".to_string(),
        ));
    }
    request
        .validate()
        .map_err(|errors| AppError::Validation(first_validation_message(&errors)))
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .next()
        .unwrap_or_else(|| "Dados da solicitação inválidos.".to_string())
}
