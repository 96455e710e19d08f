//! Effects produced by state transitions

use crate::conversation::{EntryId, EntryStatus};

/// Effects to be executed by the controller after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a pending exchange to the log
    AppendPending { entry_id: EntryId, question: String },

    /// Send the question to the answer backend (spawns as background task)
    Dispatch { entry_id: EntryId, question: String },

    /// Replace the last exchange's answer and status
    UpdateLastAnswer { text: String, status: EntryStatus },

    /// Start emitting reveal ticks for the exchange
    StartRevealTimer { entry_id: EntryId },

    /// Stop the running reveal timer
    StopRevealTimer,
}

impl Effect {
    pub fn update_last_answer(text: impl Into<String>, status: EntryStatus) -> Self {
        Effect::UpdateLastAnswer {
            text: text.into(),
            status,
        }
    }

    /// Whether this effect writes to the conversation log
    pub fn mutates_log(&self) -> bool {
        matches!(
            self,
            Effect::AppendPending { .. } | Effect::UpdateLastAnswer { .. }
        )
    }
}
