//! Discovery and import services

mod discovery;
mod orchestrator;

pub use discovery::RemoteTreeFetcher;
pub use orchestrator::{ImportOrchestrator, QueryOutcome};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Import service errors surfaced through the HTTP layer
#[derive(Error, Debug)]
pub enum ImportServiceError {
    #[error("Import error: {0}")]
    Import(#[from] jobferry_types::ImportError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for import services
pub type ImportServiceResult<T> = Result<T, ImportServiceError>;

impl IntoResponse for ImportServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImportServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ImportServiceError::Import(_) => StatusCode::BAD_GATEWAY,
            ImportServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
