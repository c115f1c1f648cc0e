//! Paginated read of persisted random values.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use pulse_core::HistoryLimit;

use crate::dto::{HistoryQuery, HistoryResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Lists the most recent results; `limit` defaults to 10 and is clamped to 1..=50.
pub async fn list(
    State(state): State<Arc<ServerState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<HistoryResponse>, AppError> {
    let query = HistoryQuery::new(pairs);
    let limit = HistoryLimit::from_query(query.limit());
    let results = services::results::recent(&state, limit)?;
    Ok(Json(HistoryResponse {
        count: results.len(),
        results,
    }))
}
