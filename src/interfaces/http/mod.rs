use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::app::AppState;
use crate::application::use_cases::csv_export;
use crate::domain::analysis::{AnalysisRequest, AnalysisResult};
use crate::domain::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

/// Response of one analysis run: partial results plus the single
/// user-visible error slot, overwritten on each new failure.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextRequest {
    pub file_name: String,
    /// Base64-encoded document bytes.
    pub data: String,
}

#[post("/analyze")]
async fn analyze(data: web::Data<HttpState>, req: web::Json<AnalysisRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Analyzing ticket (link={})", req.reference_link),
    );

    let outcome = data
        .app
        .analysis_use_case
        .execute(&data.app.llm_config, req.into_inner())
        .await;

    if let Some(error) = outcome.error.as_ref() {
        add_log(
            &data.logs,
            "ERROR",
            "HttpApi",
            &format!("Analysis failed: {}", error),
        );
    }

    HttpResponse::Ok().json(AnalyzeResponse {
        result: outcome.result,
        error: outcome.error.map(|error| error.user_message()),
    })
}

#[post("/extract-text")]
async fn extract_text(
    data: web::Data<HttpState>,
    req: web::Json<ExtractTextRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Extracting text from {}", req.file_name),
    );

    let bytes = match BASE64.decode(req.data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => {
            return HttpResponse::BadRequest()
                .body("Não foi possível decodificar o arquivo enviado.");
        }
    };

    match data.app.document_text_use_case.extract(&req.file_name, &bytes) {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Text extraction failed: {}", e),
            );
            match e {
                AppError::Validation(_) => HttpResponse::BadRequest().body(e.user_message()),
                _ => HttpResponse::InternalServerError().body(e.user_message()),
            }
        }
    }
}

#[post("/export")]
async fn export(data: web::Data<HttpState>, req: web::Json<AnalysisResult>) -> impl Responder {
    if !req.has_content() {
        return HttpResponse::BadRequest().body("Não há resultados para exportar.");
    }

    let result = req.into_inner();
    let document = csv_export::export(&result);
    let file_name = csv_export::export_file_name(&result.ticket_id);

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Exporting analysis to {}", file_name),
    );

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(document)
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap().clone();
    HttpResponse::Ok().json(logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(
    app: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> std::io::Result<Server> {
    let bind_address = (app.config.host.clone(), app.config.port);
    let state = web::Data::new(HttpState { app, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(analyze)
                .service(extract_text)
                .service(export)
                .service(get_logs),
        )
    })
    .bind(bind_address)?
    .run();

    Ok(server)
}
