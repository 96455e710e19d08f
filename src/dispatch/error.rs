//! Dispatch error types

use thiserror::Error;

/// Prefix of the answer text shown when a request fails
pub const ERROR_PREFIX: &str = "❌ Error al obtener respuesta: ";

/// Dispatch failure with a human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network_or_server(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::NetworkOrServerError, message)
    }

    /// Text that replaces the failed exchange's answer
    pub fn display_text(&self) -> String {
        format!("{ERROR_PREFIX}{}", self.message)
    }
}

/// Error classification. Transport, status and parse failures all
/// collapse into one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorKind {
    NetworkOrServerError,
}
