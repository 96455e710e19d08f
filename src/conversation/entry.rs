//! Exchange entries

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Greeting shown as the first entry of every conversation
pub const WELCOME_GREETING: &str = "¡Hola! Soy el Sargento Tomás Rivas, un veterano de la histórica \
Batalla de Ayacucho. Estoy aquí para contarte lo que ocurrió, aclarar dudas sobre los héroes de \
nuestra independencia y compartir historias de aquel día. ¡Solo pregúntame!";

/// Stable identifier for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Request in flight, no answer yet
    Pending,
    /// Answer is being revealed character by character
    Revealing,
    /// Full answer shown
    Complete,
    /// Request failed; the answer holds the error message
    Errored,
}

impl EntryStatus {
    /// Pending and revealing entries block new submissions
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Revealing)
    }

    pub fn is_settled(self) -> bool {
        !self.is_active()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Revealing => "revealing",
            Self::Complete => "complete",
            Self::Errored => "errored",
        }
    }
}

/// One user turn and its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEntry {
    pub id: EntryId,
    /// Empty only for the welcome entry
    pub question: String,
    /// Visible answer text; a prefix of the final answer while revealing
    pub answer: String,
    pub status: EntryStatus,
    pub asked_at: DateTime<Utc>,
}

impl ExchangeEntry {
    pub fn welcome() -> Self {
        Self {
            id: EntryId::new(),
            question: String::new(),
            answer: WELCOME_GREETING.to_string(),
            status: EntryStatus::Complete,
            asked_at: Utc::now(),
        }
    }

    pub fn pending(id: EntryId, question: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: String::new(),
            status: EntryStatus::Pending,
            asked_at: Utc::now(),
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_welcome(&self) -> bool {
        self.question.is_empty()
    }
}
