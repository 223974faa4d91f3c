/*
 * Responsibility
 * - AppError shared by middleware, extractors and handlers
 * - IntoResponse impl (HTTP status + `{"message": ...}` JSON body)
 * - the auth gate only ever produces MissingCredential / InvalidCredential
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// No `authorization` header (or an empty one).
    #[error("Access denied")]
    MissingCredential,
    /// Header present but the token did not verify. Sub-reasons are logged, never returned.
    #[error("Invalid token")]
    InvalidCredential,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredential => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
