//! Incremental answer reveal
//!
//! A completed answer is exposed one character at a time on a fixed
//! cadence. [`Reveal`] is the pure cursor; [`RevealTimer`] drives it.

mod timer;

pub use timer::{RevealTimer, DEFAULT_CADENCE};

use std::sync::Arc;

/// Outcome of advancing a reveal by one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// More characters remain
    Partial(String),
    /// The full text is now exposed
    Finished(String),
}

/// Cursor over an immutable answer.
///
/// Characters are Unicode scalar values, so the prefix is always valid text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    full_text: Arc<str>,
    total_chars: usize,
    /// Characters exposed so far
    cursor: usize,
    /// Byte offset matching `cursor`
    byte_end: usize,
}

impl Reveal {
    pub fn new(full_text: &str) -> Self {
        Self {
            full_text: Arc::from(full_text),
            total_chars: full_text.chars().count(),
            cursor: 0,
            byte_end: 0,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the full text in characters
    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.total_chars
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.total_chars == 0
    }

    pub fn is_done(&self) -> bool {
        self.cursor == self.total_chars
    }

    /// Text exposed so far
    pub fn prefix(&self) -> &str {
        self.full_text.get(..self.byte_end).unwrap_or_default()
    }

    /// Expose one more character.
    ///
    /// Advancing a finished reveal keeps returning the full text.
    pub fn advance(&mut self) -> RevealStep {
        let next = self
            .full_text
            .get(self.byte_end..)
            .and_then(|rest| rest.chars().next());
        if let Some(ch) = next {
            self.cursor += 1;
            self.byte_end += ch.len_utf8();
        }

        let prefix = self.prefix().to_string();
        if self.is_done() {
            RevealStep::Finished(prefix)
        } else {
            RevealStep::Partial(prefix)
        }
    }
}
