//! Environment-driven settings for the pulseboard server and dashboard.
//!
//! Both binaries load a `.env` file with `dotenvy` first, then read their
//! settings from the process environment. Missing or malformed values fall
//! back to defaults with a warning instead of aborting startup.

use std::env;

use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_PATH: &str = "data/pulseboard.db";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

/// Setting parse errors.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("Empty value for {0}")]
    Empty(&'static str),
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.into(),
        }
    }
}

impl ServerSettings {
    /// Reads `HOST`, `PORT` and `DATABASE_URL` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_port(&raw).unwrap_or_else(|e| {
                warn!("{}, using {}", e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let host = non_empty(lookup("HOST"), "HOST").unwrap_or(defaults.host);
        let database_path =
            non_empty(lookup("DATABASE_URL"), "DATABASE_URL").unwrap_or(defaults.database_path);

        Self { host, port, database_path }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the terminal dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub api_base_url: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.into() }
    }
}

impl DashboardSettings {
    /// Reads `API_BASE_URL`, falling back to `VITE_API_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = non_empty(lookup("API_BASE_URL"), "API_BASE_URL")
            .or_else(|| non_empty(lookup("VITE_API_BASE_URL"), "VITE_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        Self { api_base_url: base.trim_end_matches('/').to_string() }
    }
}

/// Parses a listen port. Zero is rejected along with non-numeric input.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}

fn non_empty(value: Option<String>, key: &'static str) -> Option<String> {
    let value = value?;
    if value.trim().is_empty() {
        warn!("{}, using default", ConfigError::Empty(key));
        return None;
    }
    Some(value.trim().to_string())
}
