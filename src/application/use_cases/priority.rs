use crate::domain::analysis::TestScenario;

pub const RANK_UNKNOWN: u8 = 4;

/// Exact-match rank for the closed set of priority labels the prompts
/// request, with the English variants the model occasionally falls back to.
/// Anything unrecognized, including the empty string, sorts last.
pub fn rank(label: &str) -> u8 {
    match label {
        "Alta" | "High" => 1,
        "Média" | "Media" | "Medium" => 2,
        "Baixa" | "Low" => 3,
        _ => RANK_UNKNOWN,
    }
}

/// Order scenarios by ascending priority rank. std's slice sort is stable,
/// so scenarios with the same rank keep their original relative order.
pub fn sort_by_priority(scenarios: &mut [TestScenario]) {
    scenarios.sort_by_key(|scenario| rank(&scenario.priority));
}
