//! Property-based tests for the state machine
//!
//! Arbitrary event sequences are run through `transition` while the
//! returned log effects are applied to a real `ConversationLog`.

use super::transition::*;
use super::*;
use crate::conversation::{ConversationLog, EntryId};
use crate::dispatch::DispatchError;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Event shapes; entry ids are filled in from the current state
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Answer(String),
    Fail(String),
    Tick,
    StaleTick,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[ a-zñ¿?]{0,12}".prop_map(Step::Submit),
        "[a-zA-Zá ]{0,8}".prop_map(Step::Answer),
        "[a-z ]{1,10}".prop_map(Step::Fail),
        Just(Step::Tick),
        Just(Step::Tick),
        Just(Step::Tick),
        Just(Step::StaleTick),
    ]
}

fn to_event(step: &Step, state: &ChatState) -> Event {
    let active = state.active_entry().unwrap_or_default();
    match step {
        Step::Submit(text) => Event::user_submit(text.clone()),
        Step::Answer(answer) => Event::AnswerReceived {
            entry_id: active,
            answer: answer.clone(),
        },
        Step::Fail(message) => Event::DispatchFailed {
            entry_id: active,
            error: DispatchError::network_or_server(message.clone()),
        },
        Step::Tick => Event::RevealTick { entry_id: active },
        Step::StaleTick => Event::RevealTick {
            entry_id: EntryId::new(),
        },
    }
}

fn apply_log_effects(log: &mut ConversationLog, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::AppendPending { entry_id, question } => {
                log.append_pending(*entry_id, question.clone()).unwrap();
            }
            Effect::UpdateLastAnswer { text, status } => {
                log.update_last_answer(text.clone(), *status).unwrap();
            }
            Effect::Dispatch { .. } | Effect::StartRevealTimer { .. } | Effect::StopRevealTimer => {}
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // At most one exchange is pending or revealing, and it is the last one
    #[test]
    fn prop_single_active_entry(steps in proptest::collection::vec(arb_step(), 0..60)) {
        let mut state = ChatState::Idle;
        let mut log = ConversationLog::initialize();

        for step in &steps {
            let event = to_event(step, &state);
            if let Ok(result) = transition(&state, event) {
                apply_log_effects(&mut log, &result.effects);
                state = result.new_state;
            }

            let active = log.entries().iter().filter(|e| e.status.is_active()).count();
            prop_assert!(active <= 1);
            prop_assert_eq!(state.is_busy(), log.is_busy());
            if let Some(id) = state.active_entry() {
                prop_assert_eq!(log.last().map(|e| e.id), Some(id));
            }
            let (_, earlier) = log.entries().split_last().unwrap();
            prop_assert!(earlier.iter().all(|e| e.status.is_settled()));
        }
    }

    // Each accepted submission adds exactly one entry; blank input adds none
    #[test]
    fn prop_one_entry_per_accepted_submission(steps in proptest::collection::vec(arb_step(), 0..60)) {
        let mut state = ChatState::Idle;
        let mut log = ConversationLog::initialize();
        let mut accepted = 0usize;

        for step in &steps {
            let before = log.len();
            let blank = matches!(step, Step::Submit(t) if t.trim().is_empty());
            let event = to_event(step, &state);
            let was_idle = !state.is_busy();

            match transition(&state, event) {
                Ok(result) => {
                    apply_log_effects(&mut log, &result.effects);
                    state = result.new_state;
                    if matches!(step, Step::Submit(_)) && was_idle && !blank {
                        accepted += 1;
                        prop_assert_eq!(log.len(), before + 1);
                    } else {
                        prop_assert_eq!(log.len(), before);
                    }
                }
                Err(TransitionError::Busy) => {
                    prop_assert!(!was_idle);
                    prop_assert_eq!(log.len(), before);
                }
                Err(TransitionError::InvalidTransition(_)) => {
                    prop_assert_eq!(log.len(), before);
                }
            }
        }

        prop_assert_eq!(log.len(), accepted + 1);
        prop_assert!(log.entries()[0].is_welcome());
    }

    // Revealing an answer produces exactly its prefixes, then completes with it
    #[test]
    fn prop_reveal_round_trip(answer in "\\PC{0,40}") {
        let submit = Event::user_submit("¿Quién ganó la batalla?");
        let mut result = transition(&ChatState::Idle, submit).unwrap();
        let mut state = result.new_state;
        let entry_id = state.active_entry().unwrap();

        result = transition(&state, Event::AnswerReceived { entry_id, answer: answer.clone() }).unwrap();
        state = result.new_state;

        let chars: Vec<char> = answer.chars().collect();
        let mut observed = vec![];
        let mut ticks = 0usize;
        while state.is_busy() {
            result = transition(&state, Event::RevealTick { entry_id }).unwrap();
            ticks += 1;
            for effect in &result.effects {
                if let Effect::UpdateLastAnswer { text, .. } = effect {
                    observed.push(text.clone());
                }
            }
            state = result.new_state;
            prop_assert!(ticks <= chars.len());
        }

        prop_assert_eq!(ticks, chars.len());
        for (k, text) in observed.iter().enumerate() {
            let expected: String = chars[..=k].iter().collect();
            prop_assert_eq!(text, &expected);
        }
        if let Some(last) = observed.last() {
            prop_assert_eq!(last, &answer);
        }
    }
}
