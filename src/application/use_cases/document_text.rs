mod docx;
mod pdf;

use serde::Serialize;

use crate::domain::error::{AppError, Result};

/// Text pulled from one page of an uploaded document.
pub(crate) struct PageText {
    pub(crate) content: String,
}

/// Concatenated text of an uploaded document, used as an alternate source
/// for the ticket description.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub text: String,
    pub total_pages: i64,
}

pub struct DocumentTextUseCase;

impl DocumentTextUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Extract plain text from an uploaded document, dispatching on the
    /// file extension. Page texts are flattened to single lines and pages
    /// joined by newline.
    pub fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedDocument> {
        let extension = file_name
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => self.extract_pdf(bytes),
            "docx" => self.extract_docx(bytes),
            "txt" => Ok(ExtractedDocument {
                text: String::from_utf8_lossy(bytes).trim().to_string(),
                total_pages: 1,
            }),
            _ => Err(AppError::Validation(
                "Formato de arquivo não suportado. Envie PDF, DOCX ou TXT.".to_string(),
            )),
        }
    }

    pub(crate) fn join_pages(pages: Vec<PageText>) -> String {
        pages
            .into_iter()
            .map(|page| page.content)
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Collapse the internal line breaks of one page into single spaces.
    pub(crate) fn flatten_page_text(raw: &str) -> String {
        raw.split_whitespace().collect::<Vec<&str>>().join(" ")
    }
}

impl Default for DocumentTextUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_plain_text() {
        let use_case = DocumentTextUseCase::new();
        let document = use_case
            .extract("descricao.txt", "  Corrigir tela de login  ".as_bytes())
            .unwrap();
        assert_eq!(document.text, "Corrigir tela de login");
        assert_eq!(document.total_pages, 1);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let use_case = DocumentTextUseCase::new();
        let document = use_case.extract("Descricao.TXT", b"conteudo").unwrap();
        assert_eq!(document.text, "conteudo");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let use_case = DocumentTextUseCase::new();
        let error = use_case.extract("planilha.xlsx", b"").unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn test_flatten_page_text_collapses_breaks() {
        assert_eq!(
            DocumentTextUseCase::flatten_page_text("linha 1\nlinha  2\r\nlinha 3"),
            "linha 1 linha 2 linha 3"
        );
    }

    #[test]
    fn test_join_pages_uses_newline() {
        let pages = vec![
            PageText {
                content: "pagina um".to_string(),
            },
            PageText {
                content: "pagina dois".to_string(),
            },
        ];
        assert_eq!(
            DocumentTextUseCase::join_pages(pages),
            "pagina um\npagina dois"
        );
    }
}
