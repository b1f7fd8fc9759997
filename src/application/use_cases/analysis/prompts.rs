pub(crate) fn build_primary_prompt(
    description: &str,
    context_note: &str,
    ticket_id: &str,
    language: &str,
) -> String {
    let mut prompt = String::from(
        "Você é um analista de QA sênior especializado em derivar cenários de teste a partir de tickets de desenvolvimento.\n\nAvalie o ticket sob cada tipo de teste (funcional, segurança, desempenho, não funcional, estrutural), escolha as técnicas de teste adequadas e nomeie a técnica aplicada dentro do campo feature de cada cenário.\n\n",
    );

    prompt.push_str(&format!(
        "Responda em {}, exceto termos técnicos e nomes de técnicas de teste, que permanecem no idioma original.\n\n",
        language
    ));

    if !ticket_id.trim().is_empty() {
        prompt.push_str(&format!("Ticket em análise: {}\n", ticket_id.trim()));
    }
    prompt.push_str(context_note);
    prompt.push_str("\n\nDescrição do ticket:\n");
    prompt.push_str(description.trim());
    prompt.push_str("\n\n");

    prompt.push_str(
        r#"Gere três saídas em um único objeto JSON:
1. "scenarios": array de cenários de teste no formato Gherkin. Cada item contém os campos ticketId, feature, scenario, given, when, then e priority, nesta ordem. O campo scenario DEVE começar com "Validar ". O campo priority usa exatamente Alta, Média ou Baixa. Preencha ticketId com o identificador do ticket.
2. "impacts": texto livre com um impacto identificado por linha.
3. "regressionTests": texto livre com uma sugestão de teste de regressão por linha.

Retorne somente o JSON, sem explicações."#,
    );

    prompt
}

pub(crate) fn build_regression_conversion_prompt(
    suggestions: &str,
    ticket_id: &str,
    language: &str,
) -> String {
    let mut prompt = String::from(
        "Você é um analista de QA sênior. Converta cada sugestão de teste de regressão abaixo em um cenário de teste no formato Gherkin.\n\n",
    );

    prompt.push_str(&format!(
        "Responda em {}, exceto termos técnicos, que permanecem no idioma original.\n\n",
        language
    ));

    prompt.push_str("Sugestões de regressão:\n");
    prompt.push_str(suggestions.trim());
    prompt.push_str("\n\n");

    prompt.push_str(&format!(
        r#"Retorne um array JSON em que cada item contém os campos ticketId, feature, scenario, given, when, then e priority, nesta ordem. O campo scenario DEVE começar com "Validar ". O campo priority usa exatamente Alta, Média ou Baixa. Preencha ticketId com "{}".

Retorne somente o JSON, sem explicações."#,
        ticket_id.trim()
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_prompt_embeds_inputs() {
        let prompt = build_primary_prompt(
            "Corrigir o cálculo de frete",
            "Contexto adicional: detalhes no ticket https://h/browse/PROJ-1.",
            "PROJ-1",
            "português (Brasil)",
        );

        assert!(prompt.contains("Corrigir o cálculo de frete"));
        assert!(prompt.contains("Contexto adicional"));
        assert!(prompt.contains("Ticket em análise: PROJ-1"));
        assert!(prompt.contains("Responda em português (Brasil)"));
    }

    #[test]
    fn test_primary_prompt_declares_output_schema() {
        let prompt = build_primary_prompt("descrição", "contexto", "PROJ-1", "português (Brasil)");

        assert!(prompt.contains("\"scenarios\""));
        assert!(prompt.contains("\"impacts\""));
        assert!(prompt.contains("\"regressionTests\""));
        assert!(prompt.contains("ticketId, feature, scenario, given, when, then e priority"));
        assert!(prompt.contains("DEVE começar com \"Validar \""));
    }

    #[test]
    fn test_primary_prompt_names_technique_taxonomy() {
        let prompt = build_primary_prompt("descrição", "contexto", "", "português (Brasil)");

        assert!(prompt.contains("funcional"));
        assert!(prompt.contains("segurança"));
        assert!(prompt.contains("desempenho"));
        assert!(prompt.contains("estrutural"));
        assert!(!prompt.contains("Ticket em análise"));
    }

    #[test]
    fn test_conversion_prompt_embeds_suggestions_and_identifier() {
        let prompt = build_regression_conversion_prompt(
            "Reexecutar o fluxo de checkout\nRevalidar cupons",
            "PROJ-2",
            "português (Brasil)",
        );

        assert!(prompt.contains("Reexecutar o fluxo de checkout"));
        assert!(prompt.contains("Preencha ticketId com \"PROJ-2\""));
        assert!(prompt.contains("array JSON"));
        assert!(prompt.contains("DEVE começar com \"Validar \""));
    }
}
