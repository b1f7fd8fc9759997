use serde::{Deserialize, Serialize};

use crate::domain::analysis::TestScenario;

/// Stage-1 payload after schema-constrained decoding. Absent optional
/// fields fall back to empty defaults.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrimaryOutput {
    #[serde(default)]
    pub(crate) scenarios: Vec<ScenarioOutput>,
    #[serde(default)]
    pub(crate) impacts: String,
    #[serde(default)]
    pub(crate) regression_tests: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScenarioOutput {
    #[serde(default)]
    pub(crate) ticket_id: String,
    #[serde(default)]
    pub(crate) feature: String,
    #[serde(default)]
    pub(crate) scenario: String,
    #[serde(default)]
    pub(crate) given: String,
    #[serde(default)]
    pub(crate) when: String,
    #[serde(default)]
    pub(crate) then: String,
    #[serde(default)]
    pub(crate) priority: String,
}

impl From<ScenarioOutput> for TestScenario {
    fn from(output: ScenarioOutput) -> Self {
        TestScenario {
            ticket_id: output.ticket_id,
            feature: output.feature,
            scenario: output.scenario,
            given: output.given,
            when: output.when,
            then: output.then,
            priority: output.priority,
        }
    }
}
