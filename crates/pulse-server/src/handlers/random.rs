//! Random value endpoint: the only mutating route.

use std::sync::Arc;

use axum::{extract::State, Json};
use pulse_core::format_timestamp;

use crate::dto::TestResponse;
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Generates, persists and returns a new random value.
pub async fn test(State(state): State<Arc<ServerState>>) -> Result<Json<TestResponse>, AppError> {
    let saved = services::results::generate(&state)?;
    Ok(Json(TestResponse {
        message: "Test endpoint reached",
        random: saved.value,
        id: saved.id,
        created_at: format_timestamp(&saved.created_at),
    }))
}
