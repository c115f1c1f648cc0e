//! Random result generation and history lookup.
//!
//! Store failures are logged here and mapped to [`AppError`] variants with
//! fixed client-facing messages. Nothing is retried.

use pulse_core::{round_value, HistoryLimit, RandomResult};
use tracing::{error, info};

use crate::error::AppError;
use crate::ServerState;

/// Draws a value, rounds it to six digits and persists it.
pub fn generate(state: &ServerState) -> Result<RandomResult, AppError> {
    let value = round_value(state.random.next_f64());

    let saved = state.store.create_random_result(value).map_err(|e| {
        error!("Failed to save random value: {}", e);
        AppError::SaveFailed
    })?;

    info!("Saved random result {} ({})", saved.id, saved.value);
    Ok(saved)
}

/// Returns the most recent results, newest first.
pub fn recent(state: &ServerState, limit: HistoryLimit) -> Result<Vec<RandomResult>, AppError> {
    state.store.list_recent(limit).map_err(|e| {
        error!("Failed to fetch history (limit {}): {}", limit.get(), e);
        AppError::FetchFailed
    })
}
