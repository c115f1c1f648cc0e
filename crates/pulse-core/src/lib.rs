//! Core domain types, error definitions, and persistence traits.
//!
//! This crate defines the types shared by the pulseboard server and dashboard:
//! the persisted random result, the history limit rules, and the store and
//! random-source abstractions the server is built against.

mod history;
mod random;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use history::HistoryLimit;
pub use random::{round_value, RandomSource, SequenceRandom, ThreadRandom, MAX_VALUE};

/// Errors raised by a [`ResultStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Backend(String),

    #[error("Invalid stored row: {0}")]
    InvalidRow(String),
}

/// One generated random value as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomResult {
    pub id: i64,
    pub value: f64,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// Current UTC time truncated to the millisecond precision the store keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

/// Persistence for random results.
///
/// Rows are append-only: there is no update or delete path.
pub trait ResultStore: Send + Sync {
    /// Inserts a new row for `value`, stamping it with the insertion time.
    fn create_random_result(&self, value: f64) -> Result<RandomResult, StoreError>;

    /// Returns up to `limit` rows, newest first.
    fn list_recent(&self, limit: HistoryLimit) -> Result<Vec<RandomResult>, StoreError>;
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
