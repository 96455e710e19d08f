//! HTTP chat backend
//!
//! `POST {"pregunta": ...}` and expect `{"respuesta": ...}` back.

use super::{DispatchError, Dispatcher};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    pregunta: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    respuesta: String,
}

/// Dispatcher backed by the chat HTTP endpoint
pub struct HttpDispatcher {
    client: Client,
    endpoint: String,
}

impl HttpDispatcher {
    /// Build a dispatcher for `endpoint`.
    ///
    /// No timeout is applied unless one is given.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DispatchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            DispatchError::network_or_server(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn submit(&self, question: &str) -> Result<String, DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { pregunta: question })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::network_or_server(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    DispatchError::network_or_server(format!("Connection failed: {e}"))
                } else {
                    DispatchError::network_or_server(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DispatchError::network_or_server(format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(DispatchError::network_or_server(format!("HTTP {status}: {body}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            DispatchError::network_or_server(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(parsed.respuesta)
    }

    fn name(&self) -> &str {
        "http"
    }
}
