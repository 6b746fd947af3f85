use crate::config::ConfigError;
use crate::quiz::{AnswerStoreError, IncompleteAnswers, SelectionError, ShareTokenError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Incomplete(IncompleteAnswers),
    Selection(SelectionError),
    ShareToken(ShareTokenError),
    UnknownPreset(String),
    Store(AnswerStoreError),
    Export(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Incomplete(err) => write!(f, "{}", err),
            AppError::Selection(err) => write!(f, "invalid answer: {}", err),
            AppError::ShareToken(err) => write!(f, "invalid share token: {}", err),
            AppError::UnknownPreset(id) => write!(f, "unknown preset '{}'", id),
            AppError::Store(err) => write!(f, "answer store error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Incomplete(err) => Some(err),
            AppError::Selection(err) => Some(err),
            AppError::ShareToken(err) => Some(err),
            AppError::UnknownPreset(_) => None,
            AppError::Store(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Incomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Selection(_) | AppError::ShareToken(_) | AppError::UnknownPreset(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Store(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Incomplete(err) => json!({
                "error": self.to_string(),
                "missing": err.missing,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<IncompleteAnswers> for AppError {
    fn from(value: IncompleteAnswers) -> Self {
        Self::Incomplete(value)
    }
}

impl From<SelectionError> for AppError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

impl From<ShareTokenError> for AppError {
    fn from(value: ShareTokenError) -> Self {
        Self::ShareToken(value)
    }
}

impl From<AnswerStoreError> for AppError {
    fn from(value: AnswerStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Export(value)
    }
}
