//! Remote log shipping to an external collector.
//!
//! Mirrors the original deployment's logging middleware: each call posts
//! one `{stack, level, package, message}` document with a bearer token.
//! Delivery is fire-and-forget on a detached thread; a dead collector
//! must never slow down or fail a registry operation.

use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use ureq::Agent;

/// Request timeout for one shipping attempt.
const SHIP_TIMEOUT_SECS: u64 = 3;

/// Shared HTTP agent (ureq's `Agent` is `Send + Sync`).
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(SHIP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// Severity accepted by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

/// Wire format of one log document.
#[derive(Debug, Clone, Serialize)]
struct LogPayload {
    stack: String,
    level: String,
    #[serde(rename = "package")]
    pkg: String,
    message: String,
}

/// Ships structured log events to a remote collector.
pub struct RemoteLogger {
    url: String,
    token: String,
    stack: String,
}

impl RemoteLogger {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            stack: stack.into(),
        }
    }

    /// Ships one event without waiting for the collector.
    ///
    /// The request runs on a detached thread; transport errors are traced
    /// locally and otherwise swallowed.
    pub fn log(&self, level: LogLevel, package: &str, message: &str) {
        let url = self.url.clone();
        let token = self.token.clone();
        let payload = LogPayload {
            stack: self.stack.clone(),
            level: level.as_str().to_string(),
            pkg: package.to_string(),
            message: message.to_string(),
        };

        thread::spawn(move || ship(&url, &token, &payload));
    }
}

/// One blocking delivery attempt. Never panics.
fn ship(url: &str, token: &str, payload: &LogPayload) {
    let result = agent()
        .post(url)
        .header("Authorization", &format!("Bearer {token}"))
        .send_json(payload);

    match result {
        Ok(response) => {
            debug!(status = response.status().as_u16(), "shipped remote log event");
        }
        Err(e) => {
            warn!(error = %e, "remote log delivery failed, event dropped");
        }
    }
}
