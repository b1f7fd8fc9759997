pub mod use_cases;

pub use use_cases::analysis::AnalysisUseCase;
pub use use_cases::document_text::DocumentTextUseCase;
