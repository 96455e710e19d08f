//! Conversation state types

use crate::conversation::EntryId;
use crate::reveal::Reveal;

/// Controller state. At most one exchange is in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatState {
    /// Ready for a question
    #[default]
    Idle,

    /// Request dispatched, waiting for the backend
    AwaitingAnswer { entry_id: EntryId },

    /// Answer known, being revealed character by character
    Revealing { entry_id: EntryId, reveal: Reveal },
}

impl ChatState {
    /// Whether a submission would be rejected
    pub fn is_busy(&self) -> bool {
        !matches!(self, ChatState::Idle)
    }

    /// The exchange currently in flight
    #[allow(dead_code)] // Used in tests
    pub fn active_entry(&self) -> Option<EntryId> {
        match self {
            ChatState::Idle => None,
            ChatState::AwaitingAnswer { entry_id } | ChatState::Revealing { entry_id, .. } => {
                Some(*entry_id)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::AwaitingAnswer { .. } => "awaiting_answer",
            ChatState::Revealing { .. } => "revealing",
        }
    }
}
