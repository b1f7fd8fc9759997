use chrono::Local;

use crate::domain::analysis::{AnalysisResult, TestScenario};

pub const EXPORT_HEADER: &str = "ID,Funcionalidade,Cenário,Dado,Quando,Então,Prioridade";
pub const PRIMARY_SECTION_MARKER: &str = "Cenários de Teste";
pub const REGRESSION_SECTION_MARKER: &str = "Testes de Regressão";
pub const IMPACT_SECTION_MARKER: &str = "Impactos";
pub const SUGGESTION_SECTION_MARKER: &str = "Sugestões de Regressão";

/// Escape one field for the exported document.
///
/// Double quotes are doubled and embedded line breaks collapse to a single
/// space; the field is wrapped in quotes only if, after those replacements,
/// it still contains a comma or a quote. The line-break flattening is a
/// deliberate lossy simplification kept for compatibility with the
/// spreadsheet tools the export targets.
fn escape_field(value: &str) -> String {
    let doubled = value.replace('"', "\"\"");
    let flattened = doubled
        .replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\r', " ");

    if flattened.contains(',') || flattened.contains('"') {
        format!("\"{}\"", flattened)
    } else {
        flattened
    }
}

fn scenario_row(scenario: &TestScenario) -> String {
    [
        scenario.ticket_id.as_str(),
        scenario.feature.as_str(),
        scenario.scenario.as_str(),
        scenario.given.as_str(),
        scenario.when.as_str(),
        scenario.then.as_str(),
        scenario.priority.as_str(),
    ]
    .iter()
    .map(|field| escape_field(field))
    .collect::<Vec<String>>()
    .join(",")
}

/// Flatten an analysis result into one delimited-text document.
///
/// Sections appear in a fixed order and are omitted entirely when their
/// source is empty: primary scenarios, regression scenarios, impact notes
/// as one block, regression-suggestion free text as one block.
pub fn export(result: &AnalysisResult) -> String {
    let mut lines = vec![EXPORT_HEADER.to_string()];

    if !result.primary_scenarios.is_empty() {
        lines.push(PRIMARY_SECTION_MARKER.to_string());
        for scenario in &result.primary_scenarios {
            lines.push(scenario_row(scenario));
        }
    }

    if let Some(regression) = result
        .regression_scenarios
        .as_ref()
        .filter(|scenarios| !scenarios.is_empty())
    {
        lines.push(REGRESSION_SECTION_MARKER.to_string());
        for scenario in regression {
            lines.push(scenario_row(scenario));
        }
    }

    if !result.impact_notes.trim().is_empty() {
        lines.push(IMPACT_SECTION_MARKER.to_string());
        lines.push(escape_field(&result.impact_notes));
    }

    if !result.regression_suggestions.trim().is_empty() {
        lines.push(SUGGESTION_SECTION_MARKER.to_string());
        lines.push(escape_field(&result.regression_suggestions));
    }

    lines.join("\n")
}

/// Download name for the exported document.
pub fn export_file_name(ticket_id: &str) -> String {
    let identifier = if ticket_id.trim().is_empty() {
        "ticket"
    } else {
        ticket_id.trim()
    };
    format!(
        "cenarios_{}_{}.csv",
        identifier,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(ticket_id: &str, name: &str) -> TestScenario {
        TestScenario {
            ticket_id: ticket_id.to_string(),
            feature: "Login".to_string(),
            scenario: name.to_string(),
            given: "Dado que o usuário está na tela de login".to_string(),
            when: "Quando informa credenciais válidas".to_string(),
            then: "Então acessa o sistema".to_string(),
            priority: "Alta".to_string(),
        }
    }

    #[test]
    fn test_escape_plain_field_unchanged() {
        assert_eq!(escape_field("simples"), "simples");
    }

    #[test]
    fn test_escape_doubles_quotes_and_wraps() {
        assert_eq!(escape_field("ele disse \"oi\""), "\"ele disse \"\"oi\"\"\"");
    }

    #[test]
    fn test_escape_wraps_on_comma() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_escape_flattens_line_breaks_without_quoting() {
        assert_eq!(escape_field("passo 1\npasso 2"), "passo 1 passo 2");
        assert_eq!(escape_field("passo 1\r\npasso 2"), "passo 1 passo 2");
    }

    #[test]
    fn test_export_starts_with_header() {
        let result = AnalysisResult::default();
        assert_eq!(export(&result), EXPORT_HEADER);
    }

    #[test]
    fn test_export_omits_empty_sections() {
        let result = AnalysisResult {
            ticket_id: "PROJ-1".to_string(),
            primary_scenarios: vec![scenario("PROJ-1", "Validar login")],
            impact_notes: String::new(),
            regression_suggestions: String::new(),
            regression_scenarios: None,
        };
        let document = export(&result);

        assert!(document.contains(PRIMARY_SECTION_MARKER));
        assert!(!document.contains(REGRESSION_SECTION_MARKER));
        assert!(!document.contains(IMPACT_SECTION_MARKER));
        assert!(!document.contains(SUGGESTION_SECTION_MARKER));
    }

    #[test]
    fn test_export_section_order() {
        let result = AnalysisResult {
            ticket_id: "PROJ-1".to_string(),
            primary_scenarios: vec![scenario("PROJ-1", "Validar login")],
            impact_notes: "Impacto no fluxo de acesso".to_string(),
            regression_suggestions: "Reexecutar suíte de login".to_string(),
            regression_scenarios: Some(vec![scenario("PROJ-1", "Validar sessão expirada")]),
        };
        let document = export(&result);

        let primary = document.find(PRIMARY_SECTION_MARKER).unwrap();
        let regression = document.find(REGRESSION_SECTION_MARKER).unwrap();
        let impacts = document.find(IMPACT_SECTION_MARKER).unwrap();
        let suggestions = document.find(SUGGESTION_SECTION_MARKER).unwrap();
        assert!(primary < regression);
        assert!(regression < impacts);
        assert!(impacts < suggestions);
    }

    #[test]
    fn test_round_trip_with_spreadsheet_reader() {
        // Re-read the export with a standard CSV reader to confirm the
        // quoting rules stay interpretable by spreadsheet tools. Embedded
        // line breaks become single spaces by design.
        let mut tricky = scenario("PROJ-9", "Validar campos, com vírgula");
        tricky.given = "Dado \"aspas\" no passo".to_string();
        tricky.then = "Então passo 1\npasso 2".to_string();

        let result = AnalysisResult {
            ticket_id: "PROJ-9".to_string(),
            primary_scenarios: vec![tricky],
            impact_notes: String::new(),
            regression_suggestions: String::new(),
            regression_scenarios: None,
        };
        let document = export(&result);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(document.as_bytes());
        let records: Vec<csv::StringRecord> =
            reader.records().map(|record| record.unwrap()).collect();

        // Row 0 is the section marker, row 1 the scenario.
        assert_eq!(records[0].get(0).unwrap(), PRIMARY_SECTION_MARKER);
        let row = &records[1];
        assert_eq!(row.get(0).unwrap(), "PROJ-9");
        assert_eq!(row.get(2).unwrap(), "Validar campos, com vírgula");
        assert_eq!(row.get(3).unwrap(), "Dado \"aspas\" no passo");
        assert_eq!(row.get(5).unwrap(), "Então passo 1 passo 2");
    }

    #[test]
    fn test_export_file_name_uses_identifier() {
        let name = export_file_name("PROJ-7");
        assert!(name.starts_with("cenarios_PROJ-7_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_export_file_name_defaults_without_identifier() {
        let name = export_file_name("  ");
        assert!(name.starts_with("cenarios_ticket_"));
    }
}
