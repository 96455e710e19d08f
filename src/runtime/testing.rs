//! Mock implementations for testing
//!
//! These mocks enable controller tests without real network I/O.

use super::ConversationController;
use crate::conversation::EntryStatus;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::reveal::DEFAULT_CADENCE;
use crate::state_machine::Event;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Dispatcher
// ============================================================================

/// Mock dispatcher that returns queued results
pub struct MockDispatcher {
    responses: Mutex<VecDeque<Result<String, DispatchError>>>,
    delay: Duration,
    /// Record of every question submitted
    pub questions: Mutex<Vec<String>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Answer only after `delay`, to observe the pending window
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay,
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn queue_answer(&self, answer: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(answer.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: DispatchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn submit(&self, question: &str) -> Result<String, DispatchError> {
        self.questions.lock().unwrap().push(question.to_string());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DispatchError::network_or_server("No mock answer queued")));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        response
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// What the last exchange looked like after one handled event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub was_tick: bool,
    pub answer: String,
    pub status: EntryStatus,
}

pub fn test_controller(mock: MockDispatcher) -> ConversationController<MockDispatcher> {
    ConversationController::new(mock, DEFAULT_CADENCE)
}

/// Drive the controller until the in-flight exchange settles, recording
/// the last exchange after every event
pub async fn observe_until_settled(
    controller: &mut ConversationController<MockDispatcher>,
) -> Vec<Observation> {
    let mut observations = vec![];
    while controller.is_busy() {
        let Some(event) = controller.next_event().await else {
            break;
        };
        let was_tick = matches!(event, Event::RevealTick { .. });
        controller.handle_event(event).unwrap();
        let last = controller.log().last().unwrap();
        observations.push(Observation {
            was_tick,
            answer: last.answer.clone(),
            status: last.status,
        });
    }
    observations
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::WELCOME_GREETING;
    use crate::dispatch::ERROR_PREFIX;
    use crate::runtime::{AskOutcome, ControllerError};
    use crate::scroll::{ScrollAction, Viewport};
    use crate::state_machine::TransitionError;

    fn viewport_at_distance(distance: f32) -> Viewport {
        Viewport {
            scroll_height: 2000.0,
            scroll_top: 2000.0 - 400.0 - distance,
            client_height: 400.0,
        }
    }

    #[tokio::test]
    async fn test_mock_dispatcher() {
        let mock = MockDispatcher::new();
        mock.queue_answer("Hola");

        assert_eq!(mock.submit("uno").await.unwrap(), "Hola");
        // Second call should fail (nothing queued)
        assert!(mock.submit("dos").await.is_err());
        assert_eq!(mock.recorded_questions(), vec!["uno", "dos"]);
    }

    #[tokio::test]
    async fn test_initial_view() {
        let controller = test_controller(MockDispatcher::new());
        let view = controller.view();

        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].answer, WELCOME_GREETING);
        assert!(view.pinned);
        assert!(!view.jump_button_visible);
        assert!(!view.busy);
    }

    /// Scenario A: a question is answered and revealed in full
    #[tokio::test(start_paused = true)]
    async fn test_question_is_answered_and_revealed() {
        let mock = MockDispatcher::new();
        mock.queue_answer("Las fuerzas patriotas.");
        let mut controller = test_controller(mock);

        let outcome = controller.ask("¿Quién ganó la batalla?").unwrap();
        let AskOutcome::Dispatched(entry_id) = outcome else {
            panic!("Expected dispatch, got {outcome:?}");
        };

        // Pending entry appended before any answer arrives
        let pending = controller.log().last().unwrap();
        assert_eq!(pending.id, entry_id);
        assert_eq!(pending.status, EntryStatus::Pending);
        assert_eq!(pending.answer, "");
        assert!(controller.view().busy);

        let observations = observe_until_settled(&mut controller).await;

        let log = controller.log();
        assert_eq!(log.len(), 2);
        let last = log.last().unwrap();
        assert_eq!(last.question, "¿Quién ganó la batalla?");
        assert_eq!(last.answer, "Las fuerzas patriotas.");
        assert_eq!(last.status, EntryStatus::Complete);
        assert!(!controller.is_busy());

        // One tick per character, each exposing one more character
        let full: Vec<char> = "Las fuerzas patriotas.".chars().collect();
        let ticks: Vec<&Observation> = observations.iter().filter(|o| o.was_tick).collect();
        assert_eq!(ticks.len(), full.len());
        for (k, tick) in ticks.iter().enumerate() {
            let expected: String = full[..=k].iter().collect();
            assert_eq!(tick.answer, expected);
        }
        assert!(ticks[..ticks.len() - 1]
            .iter()
            .all(|o| o.status == EntryStatus::Revealing));

        // Reveal starts from an empty answer
        assert_eq!(observations[0].answer, "");
        assert_eq!(observations[0].status, EntryStatus::Revealing);
    }

    /// Scenario B: whitespace-only input leaves the log unchanged
    #[tokio::test]
    async fn test_blank_question_is_ignored() {
        let mock = MockDispatcher::new();
        let mut controller = test_controller(mock);

        assert_eq!(controller.ask("  ").unwrap(), AskOutcome::Ignored);
        assert_eq!(controller.ask("").unwrap(), AskOutcome::Ignored);

        assert_eq!(controller.log().len(), 1);
        assert!(!controller.is_busy());
        assert!(controller.take_scroll_action().is_none());
        assert!(controller.dispatcher().recorded_questions().is_empty());
    }

    /// Scenario C: a failed request finalizes the entry with an error, no reveal
    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_error_without_reveal() {
        let mock = MockDispatcher::new();
        mock.queue_error(DispatchError::network_or_server("timeout"));
        let mut controller = test_controller(mock);

        controller.ask("¿Cuándo fue?").unwrap();
        let observations = observe_until_settled(&mut controller).await;

        assert!(observations.iter().all(|o| !o.was_tick));
        assert_eq!(observations.len(), 1);

        let last = controller.log().last().unwrap();
        assert_eq!(last.status, EntryStatus::Errored);
        assert!(last.answer.starts_with(ERROR_PREFIX));
        assert_eq!(last.answer, "❌ Error al obtener respuesta: timeout");
        assert_eq!(controller.log().len(), 2);
    }

    /// Scenario D: an empty answer completes with zero ticks
    #[tokio::test(start_paused = true)]
    async fn test_empty_answer_completes_immediately() {
        let mock = MockDispatcher::new();
        mock.queue_answer("");
        let mut controller = test_controller(mock);

        controller.ask("¿Algo?").unwrap();
        let observations = observe_until_settled(&mut controller).await;

        assert_eq!(
            observations,
            vec![Observation {
                was_tick: false,
                answer: String::new(),
                status: EntryStatus::Complete,
            }]
        );
    }

    /// Scenario E: scrolling away unpins, scrolling back re-pins
    #[tokio::test]
    async fn test_scroll_pin_follows_viewport() {
        let mut controller = test_controller(MockDispatcher::new());

        assert!(controller.on_scroll(viewport_at_distance(80.0)));
        assert!(!controller.view().pinned);
        assert!(controller.view().jump_button_visible);

        assert!(controller.on_scroll(viewport_at_distance(10.0)));
        assert!(controller.view().pinned);
        assert!(!controller.view().jump_button_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_ask_is_rejected() {
        let mock = MockDispatcher::with_delay(Duration::from_secs(1));
        mock.queue_answer("uno");
        mock.queue_answer("dos");
        let mut controller = test_controller(mock);

        controller.ask("primera").unwrap();
        let err = controller.ask("segunda").unwrap_err();
        assert_eq!(err, ControllerError::Transition(TransitionError::Busy));
        assert_eq!(controller.log().len(), 2);

        // Still rejected while revealing
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event).unwrap();
        assert!(controller.ask("segunda").is_err());

        controller.settle().await.unwrap();
        assert!(matches!(controller.ask("segunda").unwrap(), AskOutcome::Dispatched(_)));
        controller.settle().await.unwrap();

        let entries = controller.log().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].answer, "uno");
        assert_eq!(entries[2].answer, "dos");
        assert_eq!(
            controller.dispatcher().recorded_questions(),
            vec!["primera", "segunda"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_conversation_continues_after_error() {
        let mock = MockDispatcher::new();
        mock.queue_error(DispatchError::network_or_server("Connection failed"));
        mock.queue_answer("Sucre.");
        let mut controller = test_controller(mock);

        controller.ask("uno").unwrap();
        controller.settle().await.unwrap();
        controller.ask("¿Quién comandó?").unwrap();
        controller.settle().await.unwrap();

        let entries = controller.log().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].status, EntryStatus::Errored);
        assert_eq!(entries[2].status, EntryStatus::Complete);
        assert_eq!(entries[2].answer, "Sucre.");
        assert_eq!(entries[0].answer, WELCOME_GREETING);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_mutation_notifies_scroll() {
        let mock = MockDispatcher::new();
        mock.queue_answer("ab");
        let mut controller = test_controller(mock);

        controller.ask("¿?").unwrap();
        assert_eq!(controller.take_scroll_action(), Some(ScrollAction::FollowLatest));
        assert_eq!(controller.take_scroll_action(), None);

        // User scrolls away mid-exchange; further mutations only show the button
        controller.on_scroll(viewport_at_distance(300.0));
        while controller.is_busy() {
            let event = controller.next_event().await.unwrap();
            controller.handle_event(event).unwrap();
            assert_eq!(controller.take_scroll_action(), Some(ScrollAction::ShowJumpButton));
        }

        assert_eq!(controller.jump_to_latest(), ScrollAction::SmoothScrollToBottom);
        assert!(controller.view().pinned);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_mid_reveal_stops_mutations() {
        let mock = MockDispatcher::new();
        mock.queue_answer("Una respuesta bastante larga.");
        let mut controller = test_controller(mock);

        let AskOutcome::Dispatched(entry_id) = controller.ask("¿Y entonces?").unwrap() else {
            panic!("Expected dispatch");
        };
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event).unwrap();

        // Let ticks pile up in the channel without handling them
        tokio::time::sleep(DEFAULT_CADENCE * 5).await;
        let before = controller.log().last().unwrap().answer.clone();

        controller.shutdown();
        assert!(!controller.is_busy());
        controller.settle().await.unwrap();

        while let Some(event) = controller.next_event().await {
            controller.handle_event(event).unwrap();
        }
        controller.handle_event(Event::RevealTick { entry_id }).unwrap();
        tokio::time::sleep(DEFAULT_CADENCE * 10).await;

        assert_eq!(controller.log().last().unwrap().answer, before);
        assert!(!controller.view().busy);
        assert_eq!(
            controller.ask("¿Otra?").unwrap_err(),
            ControllerError::ShutDown
        );
        assert_eq!(controller.log().len(), 2);
    }
}
