use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::completeness::{ItemImportError, UnknownValue};
use crate::workflows::journey::{JourneyError, PhaseParseError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("journey error: {0}")]
    Journey(#[from] JourneyError),
    #[error("invalid request: {0}")]
    UnknownPhase(#[from] PhaseParseError),
    #[error("invalid request: {0}")]
    UnknownValue(#[from] UnknownValue),
    #[error("import error: {0}")]
    Import(#[from] ItemImportError),
    #[error("invalid request: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Journey(_)
            | AppError::UnknownPhase(_)
            | AppError::UnknownValue(_)
            | AppError::Import(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
