use lopdf::Document;

use super::{DocumentTextUseCase, ExtractedDocument, PageText};
use crate::domain::error::{AppError, Result};

impl DocumentTextUseCase {
    pub(super) fn extract_pdf(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let document = Document::load_mem(bytes)
            .map_err(|e| AppError::ParseError(format!("Não foi possível ler o PDF: {}", e)))?;

        let mut pages = Vec::new();
        let mut total_pages = 0i64;

        for (page_number, _object_id) in document.get_pages() {
            total_pages += 1;
            if let Ok(page_text) = document.extract_text(&[page_number]) {
                let flattened = Self::flatten_page_text(&page_text);
                if !flattened.is_empty() {
                    pages.push(PageText { content: flattened });
                }
            }
        }

        Ok(ExtractedDocument {
            text: Self::join_pages(pages),
            total_pages,
        })
    }
}
