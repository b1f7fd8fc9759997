use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::AppError;

/// One Given/When/Then behavioral test case produced by a generation stage.
///
/// `given`, `when` and `then` may embed internal line breaks representing
/// multi-step clauses. `scenario` is requested to start with "Validar " by
/// the prompt; that prefix is a prompt contract, not a validated invariant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestScenario {
    #[serde(default)]
    pub ticket_id: String,
    #[serde(default)]
    pub feature: String,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub given: String,
    #[serde(default)]
    pub when: String,
    #[serde(default)]
    pub then: String,
    #[serde(default)]
    pub priority: String,
}

/// Aggregate output of one full analysis run.
///
/// `regression_scenarios` is `None` when stage 2 never ran (no suggestions,
/// or stage 2 failed) and `Some(vec![])` when it ran and produced nothing.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ticket_id: String,
    pub primary_scenarios: Vec<TestScenario>,
    pub impact_notes: String,
    pub regression_suggestions: String,
    pub regression_scenarios: Option<Vec<TestScenario>>,
}

impl AnalysisResult {
    pub fn has_content(&self) -> bool {
        !self.primary_scenarios.is_empty()
            || !self.impact_notes.trim().is_empty()
            || !self.regression_suggestions.trim().is_empty()
            || self
                .regression_scenarios
                .as_ref()
                .map(|scenarios| !scenarios.is_empty())
                .unwrap_or(false)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[validate(url(message = "O link informado não é uma URL válida."))]
    pub reference_link: String,
    pub description: String,
}

/// What one run reports back to the surface: partial results are allowed
/// (stage-2 failure keeps stage-1 data), plus the first error encountered.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub result: Option<AnalysisResult>,
    pub error: Option<AppError>,
}

impl AnalysisOutcome {
    pub fn success(result: AnalysisResult) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: AppError) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }

    pub fn partial(result: AnalysisResult, error: AppError) -> Self {
        Self {
            result: Some(result),
            error: Some(error),
        }
    }
}

/// Observable run state of the orchestrator. A fresh run always starts from
/// `Idle`; `Complete` and `Errored` are terminal.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Stage1Running,
    Stage1Done,
    Stage2Running,
    Complete,
    Errored,
}

impl RunState {
    /// Whether a new run may begin: the orchestrator rejects overlapping
    /// runs until the previous one reaches `Complete` or `Errored`.
    pub fn accepts_new_run(self) -> bool {
        matches!(self, RunState::Idle | RunState::Complete | RunState::Errored)
    }
}
