//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error
//! responses, so every NailSync endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nailsync_core::errors::CrmError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `CrmError` and implements `IntoResponse`, producing a
/// body of the form `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub CrmError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CrmError::NotFound(_) => StatusCode::NOT_FOUND,
            CrmError::Validation(_) => StatusCode::BAD_REQUEST,
            CrmError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `CrmResult` inside handlers
impl From<CrmError> for AppError {
    fn from(err: CrmError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on `eyre::Result` inside handlers; reported as a database error
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CrmError::Database(err))
    }
}
