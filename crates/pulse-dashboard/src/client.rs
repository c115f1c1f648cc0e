//! HTTP client for the pulseboard API.
//!
//! No timeouts, retries or cancellation: a request runs until the server or
//! the transport gives up.

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::endpoints::EndpointDescriptor;

/// Failures surfaced to the dashboard as error states.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Thin wrapper over `reqwest` bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint; history requests carry the limit.
    pub fn url_for(&self, endpoint: &EndpointDescriptor, history_limit: f64) -> String {
        if endpoint.is_history() {
            format!("{}{}?limit={}", self.base_url, endpoint.path, history_limit)
        } else {
            format!("{}{}", self.base_url, endpoint.path)
        }
    }

    /// Issues a GET and parses the body as JSON. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<Value, ClientError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            info!("{} answered {}", url, status);
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
