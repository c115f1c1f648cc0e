//! HTTP API for the service pulseboard.
//!
//! Exposes `/health`, `/test`, `/info` and `/history`. The random value and
//! history routes go through a [`ResultStore`]; the rest are pure.

pub mod db;
pub mod dto;
pub mod error;
mod handlers;
mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::routing::get;
use axum::Router;
use pulse_core::{RandomSource, ResultStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::{DOCS_URL, SERVICE_NAME};
pub use error::{AppError, FETCH_FAILED, SAVE_FAILED};

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub store: Arc<dyn ResultStore>,
    pub random: Arc<dyn RandomSource>,
}

impl ServerState {
    pub fn new(store: Arc<dyn ResultStore>, random: Arc<dyn RandomSource>) -> Self {
        Self { store, random }
    }
}

/// Builds the router with CORS and request tracing applied.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/test", get(handlers::random::test))
        .route("/history", get(handlers::history::list))
        .route("/info", get(handlers::info))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}
