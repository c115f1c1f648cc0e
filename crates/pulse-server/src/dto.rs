//! Data transfer objects for HTTP message serialization.

use pulse_core::RandomResult;
use serde::Serialize;

/// Response from the heartbeat endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Response from the random value endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub message: &'static str,
    pub random: f64,
    pub id: i64,
    pub created_at: String,
}

/// Query params for the history endpoint, kept as raw pairs.
///
/// Extraction into pairs never fails, so malformed or repeated `limit`
/// values reach the normalization rules instead of being rejected.
#[derive(Debug, Default)]
pub struct HistoryQuery {
    pairs: Vec<(String, String)>,
}

impl HistoryQuery {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// The single `limit` value, if exactly one was given.
    ///
    /// A repeated `limit` is ambiguous and reads as absent.
    pub fn limit(&self) -> Option<&str> {
        let mut values = self.pairs.iter().filter(|(k, _)| k == "limit");
        match (values.next(), values.next()) {
            (Some((_, v)), None) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Response from the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub results: Vec<RandomResult>,
}

/// Static service metadata.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}
