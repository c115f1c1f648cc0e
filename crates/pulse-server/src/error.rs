//! API error types and Axum response conversion.
//!
//! Store failures reach clients only as fixed messages; the underlying cause
//! is logged where the failure happens.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const SAVE_FAILED: &str = "Unable to save random value";
pub const FETCH_FAILED: &str = "Unable to fetch history";

/// Failures a pulseboard route can answer with.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// No route matches the requested path.
    RouteNotFound { path: String },
    /// Persisting a new random result failed.
    SaveFailed,
    /// Reading recent results failed.
    FetchFailed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::SaveFailed | AppError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message placed in the `error` field.
    pub fn message(&self) -> String {
        match self {
            AppError::RouteNotFound { path } => format!("No route for {}", path),
            AppError::SaveFailed => SAVE_FAILED.to_string(),
            AppError::FetchFailed => FETCH_FAILED.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}
