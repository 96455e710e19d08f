//! Events that can occur in a conversation

use crate::conversation::EntryId;
use crate::dispatch::DispatchError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserSubmit {
        text: String,
        /// Identity given to the new exchange if the submission is accepted
        entry_id: EntryId,
    },

    // Dispatch events
    AnswerReceived {
        entry_id: EntryId,
        answer: String,
    },
    DispatchFailed {
        entry_id: EntryId,
        error: DispatchError,
    },

    // Reveal events
    RevealTick {
        entry_id: EntryId,
    },
}

impl Event {
    #[allow(dead_code)] // Constructor for tests
    pub fn user_submit(text: impl Into<String>) -> Self {
        Event::UserSubmit {
            text: text.into(),
            entry_id: EntryId::new(),
        }
    }
}
