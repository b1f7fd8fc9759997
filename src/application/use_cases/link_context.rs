use url::Url;

/// Hosts matching this suffix are treated as the sample environment used in
/// demos, where the ticket content is known not to be reachable.
const SAMPLE_HOST_SUFFIX: &str = "example.com";

/// Pull a short identifier token out of a ticket reference URL.
///
/// Returns the segment following `browse` or `ticket` when present,
/// otherwise the last path segment. An unparseable URL yields an empty
/// string, never an error. This is a convention heuristic, not a
/// project-key parser.
pub fn extract_ticket_id(link: &str) -> String {
    let parsed = match Url::parse(link) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    let segments: Vec<&str> = match parsed.path_segments() {
        Some(segments) => segments.collect(),
        None => return String::new(),
    };

    if let Some(position) = segments
        .iter()
        .position(|segment| *segment == "browse" || *segment == "ticket")
    {
        if let Some(next) = segments.get(position + 1) {
            return (*next).to_string();
        }
    }

    segments.last().copied().unwrap_or("").to_string()
}

/// Derive the "additional context" note embedded in the primary prompt.
///
/// Stub standing in for real link-content retrieval: the ticket page is
/// never fetched, so the note only names the link and branches on the
/// sample-domain convention.
pub fn derive_context_note(link: &str) -> String {
    let is_sample_host = Url::parse(link)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
        .map(|host| host == SAMPLE_HOST_SUFFIX || host.ends_with(&format!(".{}", SAMPLE_HOST_SUFFIX)))
        .unwrap_or(false);

    if is_sample_host {
        format!(
            "Observação: o link {} aponta para um ambiente de exemplo; baseie a análise apenas na descrição fornecida.",
            link.trim()
        )
    } else {
        format!(
            "Contexto adicional: detalhes complementares podem ser consultados no ticket {}.",
            link.trim()
        )
    }
}
