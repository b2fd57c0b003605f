//! Error types for the Reportfill API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use draft_store::DraftStoreError;
use reportfill_workflow::WorkflowError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No generated document for member: {0}")]
    DocumentNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Store(#[from] DraftStoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::DocumentNotFound(name) => (
                StatusCode::NOT_FOUND,
                format!("No generated document for member: {}", name),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Workflow(WorkflowError::MissingMandatory(fields)) => (
                StatusCode::BAD_REQUEST,
                format!("Mandatory fields are missing: {}", fields.join(", ")),
            ),
            ApiError::Workflow(e) => {
                tracing::error!("Workflow error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Store(e) => {
                tracing::error!("Draft store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
