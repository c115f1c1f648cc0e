//! Request state container for the dashboard.
//!
//! All per-endpoint state lives in one [`Dashboard`] value and changes only
//! through [`Dashboard::begin`] and [`Dashboard::settle`]. Each `begin` hands
//! out a [`RequestToken`]; a settle carrying anything but the newest token for
//! its endpoint is dropped, so a stale response never overwrites a newer one.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::endpoints::{EndpointDescriptor, ENDPOINTS};

/// Client-side view of one endpoint's most recent call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success { payload: Value },
    Error { error: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

/// Proof that a request was started, required to settle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub path: &'static str,
    generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    state: RequestState,
    generation: u64,
}

/// Mapping from endpoint path to request state, plus the history limit input.
#[derive(Debug)]
pub struct Dashboard {
    slots: HashMap<&'static str, Slot>,
    history_limit: f64,
}

static IDLE: RequestState = RequestState::Idle;

pub const DEFAULT_HISTORY_LIMIT: f64 = 10.0;

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            slots: ENDPOINTS.iter().map(|e| (e.path, Slot::default())).collect(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Current state for `path`; unknown paths read as idle.
    pub fn state(&self, path: &str) -> &RequestState {
        self.slots.get(path).map(|s| &s.state).unwrap_or(&IDLE)
    }

    /// Moves an endpoint to `loading` and returns its token.
    ///
    /// Returns `None` for unknown endpoints and for endpoints that already have
    /// a request outstanding (the control is disabled while loading).
    pub fn begin(&mut self, endpoint: &EndpointDescriptor) -> Option<RequestToken> {
        let slot = self.slots.get_mut(endpoint.path)?;
        if slot.state.is_loading() {
            debug!("{} is busy, ignoring trigger", endpoint.path);
            return None;
        }

        slot.generation += 1;
        slot.state = RequestState::Loading;
        Some(RequestToken { path: endpoint.path, generation: slot.generation })
    }

    /// Applies a finished request. Returns `false` if the token is stale.
    pub fn settle(&mut self, token: RequestToken, outcome: Result<Value, String>) -> bool {
        let Some(slot) = self.slots.get_mut(token.path) else {
            return false;
        };
        if slot.generation != token.generation || !slot.state.is_loading() {
            debug!("Dropping stale response for {}", token.path);
            return false;
        }

        slot.state = match outcome {
            Ok(payload) => RequestState::Success { payload },
            Err(error) => RequestState::Error { error },
        };
        true
    }

    /// Number of endpoints with a request outstanding.
    pub fn pending(&self) -> usize {
        self.slots.values().filter(|s| s.state.is_loading()).count()
    }

    pub fn history_limit(&self) -> f64 {
        self.history_limit
    }

    /// Stores the history limit input as typed. Only blank, non-numeric or
    /// zero input becomes 1; negative and fractional values are sent as-is
    /// and the server applies the real bounds.
    pub fn set_history_limit(&mut self, raw: &str) {
        let trimmed = raw.trim();
        let parsed = if trimmed.is_empty() {
            0.0
        } else {
            trimmed.parse::<f64>().unwrap_or(f64::NAN)
        };
        self.history_limit = if parsed.is_nan() || parsed == 0.0 { 1.0 } else { parsed };
    }
}
