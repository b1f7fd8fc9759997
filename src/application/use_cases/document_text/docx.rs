use super::{DocumentTextUseCase, ExtractedDocument};
use crate::domain::error::{AppError, Result};

impl DocumentTextUseCase {
    // DOCX has no reliable page boundaries, so the whole document counts
    // as a single page.
    pub(super) fn extract_docx(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| AppError::ParseError(format!("Não foi possível ler o DOCX: {}", e)))?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            collect_document_child(child, &mut lines);
        }

        Ok(ExtractedDocument {
            text: Self::flatten_page_text(&lines.join(" ")),
            total_pages: 1,
        })
    }
}

fn collect_document_child(child: &docx_rs::DocumentChild, lines: &mut Vec<String>) {
    match child {
        docx_rs::DocumentChild::Paragraph(paragraph) => {
            let text = collect_paragraph(paragraph);
            if !text.trim().is_empty() {
                lines.push(text);
            }
        }
        docx_rs::DocumentChild::Table(table) => collect_table(table, lines),
        _ => {}
    }
}

fn collect_paragraph(paragraph: &docx_rs::Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        collect_paragraph_child(child, &mut buffer);
    }
    buffer
}

fn collect_paragraph_child(child: &docx_rs::ParagraphChild, buffer: &mut String) {
    match child {
        docx_rs::ParagraphChild::Run(run) => collect_run(run, buffer),
        docx_rs::ParagraphChild::Hyperlink(link) => {
            for link_child in &link.children {
                collect_paragraph_child(link_child, buffer);
            }
        }
        _ => {}
    }
}

fn collect_run(run: &docx_rs::Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text) => buffer.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => buffer.push(' '),
            docx_rs::RunChild::Break(_) => buffer.push(' '),
            _ => {}
        }
    }
}

fn collect_table(table: &docx_rs::Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        let mut cells = Vec::new();
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            let mut parts = Vec::new();
            for content in &cell.children {
                if let docx_rs::TableCellContent::Paragraph(paragraph) = content {
                    let text = collect_paragraph(paragraph);
                    if !text.trim().is_empty() {
                        parts.push(text);
                    }
                }
            }
            if !parts.is_empty() {
                cells.push(parts.join(" "));
            }
        }
        if !cells.is_empty() {
            lines.push(cells.join(" "));
        }
    }
}
