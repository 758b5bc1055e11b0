//! Application error types and handling

use crate::{
    models::contact::{
        ContactResponse, MethodNotAllowedBody, INVALID_SUBMISSION_MESSAGE,
    },
    services::RelayError,
    validation::ValidationResult,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(ValidationResult),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "message": msg,
                })),
            )
                .into_response(),
            AppError::Validation(result) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "message": INVALID_SUBMISSION_MESSAGE,
                    "errors": result.errors,
                })),
            )
                .into_response(),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(MethodNotAllowedBody::default()),
            )
                .into_response(),
            AppError::Relay(err) => {
                tracing::error!(
                    step = %err.step,
                    owner_notified = err.owner_notified,
                    error = %err.source,
                    "Failed to relay contact submission"
                );
                if err.is_partial_delivery() {
                    tracing::warn!("Owner was notified but the visitor confirmation was not sent");
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ContactResponse::failed())).into_response()
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ContactResponse::failed())).into_response()
            }
        }
    }
}
