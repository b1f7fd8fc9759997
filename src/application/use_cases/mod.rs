pub mod analysis;
pub mod csv_export;
pub mod document_text;
pub mod link_context;
pub mod priority;
