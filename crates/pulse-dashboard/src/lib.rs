//! Terminal dashboard for the pulseboard API.
//!
//! Calls each known endpoint on demand, tracks an `idle`/`loading`/`success`/
//! `error` state per endpoint, and renders the raw responses.

pub mod client;
pub mod endpoints;
pub mod render;
pub mod session;
pub mod state;

pub use client::{ApiClient, ClientError};
pub use endpoints::{EndpointDescriptor, ENDPOINTS};
pub use session::{Command, Completion, Flow, Session};
pub use state::{Dashboard, RequestState, RequestToken};
