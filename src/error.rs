use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::WebhookReply;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store failures all look the same to the gateway; the detail goes to
        // the log, not the caller.
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Pool(e) => tracing::error!("Pool error: {}", e),
            AppError::Json(e) => tracing::error!("JSON error: {}", e),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(WebhookReply::failure("Internal server error")),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
