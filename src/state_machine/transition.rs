//! Pure state transition function

use super::{ChatState, Effect, Event};
use crate::conversation::EntryStatus;
use crate::reveal::{Reveal, RevealStep};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("An answer is still in progress; wait for it before asking again")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same state and event it always produces the same result; all
/// I/O is described by the returned effects.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User Submission
        // ============================================================

        // Blank input is ignored in every state
        (_, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(state.clone()))
        }

        (ChatState::Idle, Event::UserSubmit { text, entry_id }) => {
            Ok(TransitionResult::new(ChatState::AwaitingAnswer { entry_id })
                .with_effect(Effect::AppendPending {
                    entry_id,
                    question: text.clone(),
                })
                .with_effect(Effect::Dispatch {
                    entry_id,
                    question: text,
                }))
        }

        (ChatState::AwaitingAnswer { .. } | ChatState::Revealing { .. }, Event::UserSubmit { .. }) => {
            Err(TransitionError::Busy)
        }

        // ============================================================
        // Dispatch Outcome
        // ============================================================

        (ChatState::AwaitingAnswer { entry_id }, Event::AnswerReceived { entry_id: answered, answer })
            if *entry_id == answered =>
        {
            let reveal = Reveal::new(&answer);
            if reveal.is_done() {
                // Nothing to reveal
                return Ok(TransitionResult::new(ChatState::Idle)
                    .with_effect(Effect::update_last_answer("", EntryStatus::Complete)));
            }

            Ok(TransitionResult::new(ChatState::Revealing {
                entry_id: *entry_id,
                reveal,
            })
            .with_effect(Effect::update_last_answer("", EntryStatus::Revealing))
            .with_effect(Effect::StartRevealTimer { entry_id: *entry_id }))
        }

        // Errors finalize the exchange at once, no reveal
        (ChatState::AwaitingAnswer { entry_id }, Event::DispatchFailed { entry_id: failed, error })
            if *entry_id == failed =>
        {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::update_last_answer(error.display_text(), EntryStatus::Errored)))
        }

        // ============================================================
        // Reveal
        // ============================================================

        (ChatState::Revealing { entry_id, reveal }, Event::RevealTick { entry_id: ticked })
            if *entry_id == ticked =>
        {
            let mut reveal = reveal.clone();
            match reveal.advance() {
                RevealStep::Partial(prefix) => Ok(TransitionResult::new(ChatState::Revealing {
                    entry_id: *entry_id,
                    reveal,
                })
                .with_effect(Effect::update_last_answer(prefix, EntryStatus::Revealing))),
                RevealStep::Finished(full) => Ok(TransitionResult::new(ChatState::Idle)
                    .with_effect(Effect::update_last_answer(full, EntryStatus::Complete))
                    .with_effect(Effect::StopRevealTimer)),
            }
        }

        // A tick queued before its timer was stopped
        (_, Event::RevealTick { .. }) => Ok(TransitionResult::new(state.clone())),

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} for {event:?}",
            state.name()
        ))),
    }
}
