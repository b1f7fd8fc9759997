use std::sync::{Arc, Mutex};

use crate::application::use_cases::analysis::AnalysisUseCase;
use crate::application::use_cases::document_text::DocumentTextUseCase;
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{GeminiClient, GenerationClient};
use crate::interfaces::http::start_server;

pub struct AppState {
    pub config: AppConfig,
    pub llm_config: LLMConfig,
    pub analysis_use_case: AnalysisUseCase,
    pub document_text_use_case: DocumentTextUseCase,
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let llm_config = config.llm_config();

    let llm_client: Arc<dyn GenerationClient + Send + Sync> = Arc::new(GeminiClient::new());
    let analysis_use_case = AnalysisUseCase::new(llm_client, &config.language);
    let document_text_use_case = DocumentTextUseCase::new();

    tracing::info!(host = %config.host, port = config.port, model = %config.model, "starting analysis service");

    let state = Arc::new(AppState {
        config,
        llm_config,
        analysis_use_case,
        document_text_use_case,
    });
    let logs = Arc::new(Mutex::new(Vec::new()));

    start_server(state, logs)?.await
}
