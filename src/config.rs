//! Configuration from environment variables

use crate::dispatch::{
    DispatchError, Dispatcher, HttpDispatcher, LoggingDispatcher, SimulatedDispatcher,
    DEFAULT_ENDPOINT,
};
use crate::reveal::DEFAULT_CADENCE;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Which answer backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Http,
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: String,
    pub backend: BackendKind,
    pub reveal_cadence: Duration,
    /// Unset means no client-side timeout
    pub http_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            backend: BackendKind::Http,
            reveal_cadence: DEFAULT_CADENCE,
            http_timeout: None,
            log_file: std::env::temp_dir().join("rivas-chat.log"),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let backend = match lookup("RIVAS_BACKEND").as_deref().map(str::trim) {
            None | Some("" | "http") => BackendKind::Http,
            Some("simulated") => BackendKind::Simulated,
            Some(other) => {
                tracing::warn!(value = other, "Unknown RIVAS_BACKEND, using http");
                BackendKind::Http
            }
        };

        let reveal_cadence = parse_number(&lookup, "RIVAS_REVEAL_MS")
            .map_or(defaults.reveal_cadence, Duration::from_millis);

        let http_timeout = parse_number(&lookup, "RIVAS_HTTP_TIMEOUT_SECS").map(Duration::from_secs);

        Self {
            endpoint: lookup("RIVAS_CHAT_URL").unwrap_or(defaults.endpoint),
            backend,
            reveal_cadence,
            http_timeout,
            log_file: lookup("RIVAS_LOG_FILE").map_or(defaults.log_file, PathBuf::from),
        }
    }

    /// Create the configured backend, wrapped with logging
    pub fn build_dispatcher(&self) -> Result<Arc<dyn Dispatcher>, DispatchError> {
        let inner: Arc<dyn Dispatcher> = match self.backend {
            BackendKind::Http => Arc::new(HttpDispatcher::new(&self.endpoint, self.http_timeout)?),
            BackendKind::Simulated => Arc::new(SimulatedDispatcher::from_entropy()),
        };
        Ok(Arc::new(LoggingDispatcher::new(inner)))
    }
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid number");
            None
        }
    }
}
