//! Static catalog of the endpoints the dashboard can call.

/// Metadata driving one dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub label: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const HISTORY_PATH: &str = "/history";

pub static ENDPOINTS: [EndpointDescriptor; 4] = [
    EndpointDescriptor {
        label: "Health",
        path: "/health",
        description: "Simple heartbeat check",
    },
    EndpointDescriptor {
        label: "Test",
        path: "/test",
        description: "Returns a random number",
    },
    EndpointDescriptor {
        label: "Info",
        path: "/info",
        description: "Static metadata payload",
    },
    EndpointDescriptor {
        label: "History",
        path: HISTORY_PATH,
        description: "View recently persisted random numbers",
    },
];

impl EndpointDescriptor {
    /// True for the paginated history endpoint, which takes a `limit`.
    pub fn is_history(&self) -> bool {
        self.path == HISTORY_PATH
    }
}

/// Looks up an endpoint by path (`/info`) or label (`info`), ignoring case.
pub fn find(key: &str) -> Option<&'static EndpointDescriptor> {
    let key = key.trim();
    ENDPOINTS
        .iter()
        .find(|e| e.path.eq_ignore_ascii_case(key) || e.label.eq_ignore_ascii_case(key))
}
