//! Command handling and request dispatch for the terminal dashboard.
//!
//! Every call runs as its own tokio task and reports back through a channel,
//! so requests to different endpoints proceed concurrently. The session owns
//! the [`Dashboard`] and is the only place state transitions happen.

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::endpoints::{self, EndpointDescriptor, ENDPOINTS};
use crate::render::render;
use crate::state::{Dashboard, RequestToken};

pub const HELP: &str = "Commands:
  health | test | info | history   call one endpoint
  all                              call every endpoint
  limit <n>                        set the history limit
  show                             redraw the board
  help                             show this message
  quit                             exit";

/// Command parse errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing value for 'limit'")]
    MissingLimit,
}

/// One dashboard action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Call(&'static EndpointDescriptor),
    All,
    Limit(String),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();

        match head.as_str() {
            "all" => Ok(Self::All),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "limit" => parts
                .next()
                .map(|v| Self::Limit(v.to_string()))
                .ok_or(CommandError::MissingLimit),
            other => endpoints::find(other)
                .map(Self::Call)
                .ok_or_else(|| CommandError::Unknown(other.to_string())),
        }
    }
}

impl Command {
    /// Parses command-line arguments, where `limit` consumes the next argument.
    pub fn parse_args(args: &[String]) -> Result<Vec<Self>, CommandError> {
        let mut commands = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg.eq_ignore_ascii_case("limit") {
                let value = iter.next().ok_or(CommandError::MissingLimit)?;
                commands.push(Self::Limit(value.clone()));
            } else {
                commands.push(arg.parse()?);
            }
        }
        Ok(commands)
    }
}

/// Whether the caller should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Result of one request, sent back from its task.
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: Result<Value, String>,
}

/// Owns the dashboard state and spawns requests.
pub struct Session {
    dashboard: Dashboard,
    client: ApiClient,
    tx: UnboundedSender<Completion>,
}

impl Session {
    /// Creates a session and the receiver its requests report to.
    pub fn new(client: ApiClient) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            dashboard: Dashboard::new(),
            client,
            tx,
        };
        (session, rx)
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn render(&self) -> String {
        render(&self.dashboard, self.client.base_url())
    }

    /// Applies a command. Calls are spawned and settle later via [`Session::complete`].
    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Call(endpoint) => self.dispatch(endpoint),
            Command::All => ENDPOINTS.iter().for_each(|e| self.dispatch(e)),
            Command::Limit(raw) => self.dashboard.set_history_limit(&raw),
            Command::Show | Command::Help => {}
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Applies a finished request; returns `false` if it was stale.
    pub fn complete(&mut self, completion: Completion) -> bool {
        self.dashboard.settle(completion.token, completion.outcome)
    }

    /// Waits until no request is outstanding.
    pub async fn drain(&mut self, rx: &mut UnboundedReceiver<Completion>) {
        while self.dashboard.pending() > 0 {
            match rx.recv().await {
                Some(completion) => {
                    self.complete(completion);
                }
                None => break,
            }
        }
    }

    fn dispatch(&mut self, endpoint: &'static EndpointDescriptor) {
        let Some(token) = self.dashboard.begin(endpoint) else {
            warn!("{} already has a request in flight", endpoint.path);
            return;
        };

        let url = self.client.url_for(endpoint, self.dashboard.history_limit());
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = client.fetch(&url).await.map_err(|e| e.to_string());
            if tx.send(Completion { token, outcome }).is_err() {
                debug!("Session closed before {} settled", url);
            }
        });
    }
}
