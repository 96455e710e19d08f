//! Append-only conversation log

use super::entry::{EntryId, EntryStatus, ExchangeEntry};
use thiserror::Error;

/// Errors from log mutations. Both indicate controller misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("Entry {0} is still awaiting its answer")]
    InvariantViolation(EntryId),
    #[error("No exchange to update")]
    NotFound,
}

/// Ordered sequence of exchanges. Entries are never removed or reordered,
/// and only the last one can change.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    entries: Vec<ExchangeEntry>,
}

impl ConversationLog {
    /// A log holding only the welcome entry
    pub fn initialize() -> Self {
        Self {
            entries: vec![ExchangeEntry::welcome()],
        }
    }

    /// Append an exchange awaiting its answer.
    ///
    /// Fails if another exchange is still pending or revealing.
    pub fn append_pending(
        &mut self,
        id: EntryId,
        question: impl Into<String>,
    ) -> Result<(), LogError> {
        if let Some(active) = self.active() {
            return Err(LogError::InvariantViolation(active.id));
        }
        self.entries.push(ExchangeEntry::pending(id, question));
        Ok(())
    }

    /// Replace the answer and status of the last exchange.
    ///
    /// The welcome entry is not an exchange and is never rewritten.
    pub fn update_last_answer(
        &mut self,
        text: impl Into<String>,
        status: EntryStatus,
    ) -> Result<&ExchangeEntry, LogError> {
        if self.entries.len() < 2 {
            return Err(LogError::NotFound);
        }
        let last = self.entries.last_mut().ok_or(LogError::NotFound)?;
        last.answer = text.into();
        last.status = status;
        Ok(last)
    }

    pub fn entries(&self) -> &[ExchangeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(dead_code)] // Used in tests
    pub fn last(&self) -> Option<&ExchangeEntry> {
        self.entries.last()
    }

    /// The exchange currently pending or revealing, if any
    pub fn active(&self) -> Option<&ExchangeEntry> {
        self.entries.last().filter(|e| e.status.is_active())
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_busy(&self) -> bool {
        self.active().is_some()
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self { entries: vec![] }
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::initialize()
    }
}
