//! Answer dispatch
//!
//! One request per user turn, normalized into an answer or a single
//! failure kind. The backend is injectable: a real HTTP endpoint or a
//! simulated one.

mod error;
mod http;
mod simulated;

pub use error::{DispatchError, DispatchErrorKind, ERROR_PREFIX};
pub use http::{HttpDispatcher, DEFAULT_ENDPOINT};
pub use simulated::SimulatedDispatcher;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answer backends
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send the question and return the answer text verbatim.
    ///
    /// Runs exactly once: no retries, no cancellation.
    async fn submit(&self, question: &str) -> Result<String, DispatchError>;

    /// Short backend name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Dispatcher + ?Sized> Dispatcher for Arc<T> {
    async fn submit(&self, question: &str) -> Result<String, DispatchError> {
        (**self).submit(question).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Logging wrapper for dispatchers
pub struct LoggingDispatcher {
    inner: Arc<dyn Dispatcher>,
    name: String,
}

impl LoggingDispatcher {
    pub fn new(inner: Arc<dyn Dispatcher>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl Dispatcher for LoggingDispatcher {
    async fn submit(&self, question: &str) -> Result<String, DispatchError> {
        let start = std::time::Instant::now();
        let result = self.inner.submit(question).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    backend = %self.name,
                    duration_ms = %duration.as_millis(),
                    question_chars = question.chars().count(),
                    answer_chars = answer.chars().count(),
                    "Answer received"
                );
            }
            Err(e) => {
                tracing::error!(
                    backend = %self.name,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
