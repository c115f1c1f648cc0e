//! HTTP route handlers for the pulseboard API.

pub mod history;
pub mod random;

use axum::{http::Uri, Json};
use pulse_core::{format_timestamp, now_millis};

use crate::dto::{HealthResponse, InfoResponse};
use crate::error::AppError;

pub const SERVICE_NAME: &str = "simple-backend";
pub const DOCS_URL: &str = "https://docs.rs/axum/latest/axum/";

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: format_timestamp(&now_millis()),
    })
}

/// Static service metadata.
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        docs: DOCS_URL,
    })
}

/// Catch-all for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound { path: uri.path().to_string() }
}
