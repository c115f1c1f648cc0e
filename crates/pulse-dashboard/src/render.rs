//! Text rendering of the dashboard. Output depends only on the current state.

use std::fmt;

use chrono::Local;
use pulse_core::RandomResult;
use serde::Deserialize;
use serde_json::Value;

use crate::endpoints::{EndpointDescriptor, ENDPOINTS};
use crate::state::{Dashboard, RequestState};

pub const TITLE: &str = "Service Pulseboard";

const RULE: &str = "------------------------------------------------------------";

#[derive(Deserialize)]
struct HistoryPayload {
    count: usize,
    results: Vec<RandomResult>,
}

/// Displayable snapshot of the whole board.
pub struct Board<'a> {
    pub dashboard: &'a Dashboard,
    pub base_url: &'a str,
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(
            f,
            "Fire the backend endpoints with a single command. Results appear below each endpoint."
        )?;
        writeln!(f, "API: {}", self.base_url)?;
        writeln!(f, "{}", RULE)?;

        for endpoint in ENDPOINTS.iter() {
            let state = self.dashboard.state(endpoint.path);
            if endpoint.is_history() {
                write_history_card(f, endpoint, state, self.dashboard.history_limit())?;
            } else {
                write_card(f, endpoint, state)?;
            }
            writeln!(f, "{}", RULE)?;
        }
        Ok(())
    }
}

/// Renders the board to a string.
pub fn render(dashboard: &Dashboard, base_url: &str) -> String {
    Board { dashboard, base_url }.to_string()
}

fn button(endpoint: &EndpointDescriptor, state: &RequestState, busy_caption: &str) -> String {
    if state.is_loading() {
        format!("[ {} ]", busy_caption)
    } else {
        format!("[ {} ]", endpoint.label)
    }
}

fn write_card(
    f: &mut fmt::Formatter<'_>,
    endpoint: &EndpointDescriptor,
    state: &RequestState,
) -> fmt::Result {
    writeln!(f, "{}  {}", button(endpoint, state, "Calling..."), endpoint.path)?;
    writeln!(f, "{}", endpoint.description)?;

    match state {
        RequestState::Idle => {
            writeln!(f, "  (info) No call yet. Press the button to fetch a response.")
        }
        RequestState::Loading => writeln!(f, "  (info) Waiting for response..."),
        RequestState::Success { payload } => {
            writeln!(f, "  (ok)")?;
            write_json(f, payload)
        }
        RequestState::Error { error } => writeln!(f, "  (error) {}", error),
    }
}

fn write_history_card(
    f: &mut fmt::Formatter<'_>,
    endpoint: &EndpointDescriptor,
    state: &RequestState,
    limit: f64,
) -> fmt::Result {
    writeln!(
        f,
        "{}  {}  Limit (1-50): {}",
        button(endpoint, state, "Fetching..."),
        endpoint.path,
        limit
    )?;
    writeln!(f, "{}", endpoint.description)?;

    match state {
        RequestState::Idle => writeln!(f, "  (info) No history loaded yet."),
        RequestState::Loading => writeln!(f, "  (info) Retrieving saved values..."),
        RequestState::Error { error } => writeln!(f, "  (error) {}", error),
        RequestState::Success { payload } => {
            match serde_json::from_value::<HistoryPayload>(payload.clone()) {
                Ok(history) => {
                    writeln!(f, "  {} records returned", history.count)?;
                    for entry in &history.results {
                        writeln!(f, "  - Value: {}", entry.value)?;
                        writeln!(
                            f,
                            "    Saved {}",
                            entry.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                        )?;
                    }
                    Ok(())
                }
                Err(_) => write_json(f, payload),
            }
        }
    }
}

fn write_json(f: &mut fmt::Formatter<'_>, payload: &Value) -> fmt::Result {
    let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    for line in pretty.lines() {
        writeln!(f, "    {}", line)?;
    }
    Ok(())
}
