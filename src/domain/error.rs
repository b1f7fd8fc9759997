use serde::{Deserialize, Serialize};
use std::fmt;

pub const GENERIC_GENERATION_ERROR: &str =
    "Não foi possível concluir a chamada ao serviço de geração.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    Validation(String),
    Transport {
        status: Option<u16>,
        message: String,
    },
    EmptyResponse,
    SchemaViolation {
        detail: String,
        payload: String,
    },
    ParseError(String),
    IoError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Transport {
                status: Some(status),
                message,
            } => write!(f, "Transport error ({}): {}", status, message),
            AppError::Transport {
                status: None,
                message,
            } => write!(f, "Transport error: {}", message),
            AppError::EmptyResponse => write!(f, "Empty generation response"),
            AppError::SchemaViolation { detail, .. } => {
                write!(f, "Schema violation: {}", detail)
            }
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

// Implement std::error::Error so callers can box or propagate the error
impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl AppError {
    /// Message shown in the single user-visible error slot of the UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Transport { message, .. } => message.clone(),
            AppError::EmptyResponse => {
                "O serviço de geração retornou uma resposta vazia.".to_string()
            }
            AppError::SchemaViolation { .. } => {
                "O serviço de geração retornou dados fora do formato esperado.".to_string()
            }
            AppError::ParseError(msg) => msg.clone(),
            AppError::IoError(_) | AppError::Internal(_) => GENERIC_GENERATION_ERROR.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
