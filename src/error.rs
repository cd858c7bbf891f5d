use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Action '{action}' is not allowed while the record is '{from}'")]
    InvalidTransition { from: String, action: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("A reason is required for this action")]
    ReasonRequired,

    #[error("The record was modified by someone else; refresh to see the latest state")]
    Conflict,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("The record store is unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable kind surfaced in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::InvalidTransition { .. } => "invalid_transition",
            Error::Forbidden(_) => "forbidden",
            Error::ReasonRequired => "reason_required",
            Error::Conflict => "conflict",
            Error::NotFound(_) => "not_found",
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::Validation(_) => "validation",
            Error::Json(_) => "json",
            Error::Io(_) => "io",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Error::InvalidTransition { .. } | Error::ReasonRequired => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Conflict => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Validation(_) | Error::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": "error",
            "kind": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<crate::store::StoreError> for Error {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::DuplicateId(_) => Error::Conflict,
            other => Error::StoreUnavailable(other.to_string()),
        }
    }
}
