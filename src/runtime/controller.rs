//! Conversation controller

use crate::conversation::{ConversationLog, EntryId, ExchangeEntry, LogError};
use crate::dispatch::Dispatcher;
use crate::reveal::RevealTimer;
use crate::scroll::{ScrollAction, ScrollCoordinator, Viewport};
use crate::state_machine::{transition, ChatState, Effect, Event, TransitionError, TransitionResult};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("Conversation has been shut down")]
    ShutDown,
}

/// Result of [`ConversationController::ask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// A new exchange was appended and its request sent
    Dispatched(EntryId),
}

/// Read-only view for the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct ConversationView<'a> {
    pub entries: &'a [ExchangeEntry],
    pub pinned: bool,
    pub jump_button_visible: bool,
    pub busy: bool,
}

/// Orchestrates submission, dispatch, reveal and scroll follow
pub struct ConversationController<D: Dispatcher + 'static> {
    state: ChatState,
    log: ConversationLog,
    scroll: ScrollCoordinator,
    dispatcher: Arc<D>,
    cadence: Duration,
    reveal_timer: Option<RevealTimer>,
    pending_scroll: Option<ScrollAction>,
    event_tx: mpsc::Sender<Event>,
    event_rx: mpsc::Receiver<Event>,
    /// Set by `shutdown`; no further event touches the log
    closed: bool,
}

impl<D: Dispatcher + 'static> ConversationController<D> {
    pub fn new(dispatcher: D, cadence: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: ChatState::Idle,
            log: ConversationLog::initialize(),
            scroll: ScrollCoordinator::new(),
            dispatcher: Arc::new(dispatcher),
            cadence,
            reveal_timer: None,
            pending_scroll: None,
            event_tx,
            event_rx,
            closed: false,
        }
    }

    /// Submit a question.
    ///
    /// Blank input is ignored. While an exchange is pending or revealing
    /// the call is rejected. On success the request runs in the background
    /// and its outcome arrives through [`Self::next_event`].
    pub fn ask(&mut self, question: &str) -> Result<AskOutcome, ControllerError> {
        if self.closed {
            return Err(ControllerError::ShutDown);
        }
        let entry_id = EntryId::new();
        let result = transition(
            &self.state,
            Event::UserSubmit {
                text: question.to_string(),
                entry_id,
            },
        )?;

        if result.effects.is_empty() {
            return Ok(AskOutcome::Ignored);
        }

        tracing::info!(entry_id = %entry_id, chars = question.chars().count(), "Question submitted");
        self.apply(result)?;
        Ok(AskOutcome::Dispatched(entry_id))
    }

    /// Wait for the next dispatch result or reveal tick
    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    /// Feed an event from [`Self::next_event`] through the state machine
    pub fn handle_event(&mut self, event: Event) -> Result<(), ControllerError> {
        if self.closed {
            tracing::debug!(?event, "Dropping event after shutdown");
            return Ok(());
        }
        let result = transition(&self.state, event).inspect_err(|e| {
            tracing::warn!(error = %e, state = self.state.name(), "Event rejected");
        })?;
        self.apply(result)
    }

    /// Process events until no exchange is in flight
    #[allow(dead_code)] // Used in tests
    pub async fn settle(&mut self) -> Result<(), ControllerError> {
        while self.state.is_busy() {
            match self.next_event().await {
                Some(event) => self.handle_event(event)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Stop the reveal timer and refuse further events.
    ///
    /// Queued events are discarded. An in-flight request is left to finish
    /// but its result never reaches the log.
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.reveal_timer.take() {
            timer.cancel();
        }
        self.event_rx.close();
        let mut discarded = 0usize;
        while self.event_rx.try_recv().is_ok() {
            discarded += 1;
        }
        self.closed = true;

        let state = std::mem::take(&mut self.state);
        tracing::info!(
            entries = self.log.len(),
            state = state.name(),
            discarded,
            "Controller shut down"
        );
    }

    fn apply(&mut self, result: TransitionResult) -> Result<(), ControllerError> {
        let previous = std::mem::replace(&mut self.state, result.new_state);
        if previous.name() != self.state.name() {
            tracing::debug!(from = previous.name(), to = self.state.name(), "State changed");
        }

        for effect in result.effects {
            let mutates_log = effect.mutates_log();
            if let Err(e) = self.execute_effect(effect) {
                // Later effects did not run; the old state still matches the log
                tracing::error!(error = %e, state = previous.name(), "Effect failed, state restored");
                self.state = previous;
                return Err(e);
            }
            if mutates_log {
                self.pending_scroll = Some(self.scroll.on_log_mutated());
            }
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) -> Result<(), ControllerError> {
        match effect {
            Effect::AppendPending { entry_id, question } => {
                self.log.append_pending(entry_id, question)?;
            }

            Effect::UpdateLastAnswer { text, status } => {
                let entry = self.log.update_last_answer(text, status)?;
                if status.is_settled() {
                    tracing::info!(
                        entry_id = %entry.id,
                        status = status.as_str(),
                        chars = entry.answer.chars().count(),
                        wait_ms = (chrono::Utc::now() - entry.asked_at).num_milliseconds(),
                        "Exchange settled"
                    );
                }
            }

            Effect::Dispatch { entry_id, question } => {
                let dispatcher = self.dispatcher.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    let event = match dispatcher.submit(&question).await {
                        Ok(answer) => Event::AnswerReceived { entry_id, answer },
                        Err(error) => Event::DispatchFailed { entry_id, error },
                    };
                    let _ = event_tx.send(event).await;
                });
            }

            Effect::StartRevealTimer { entry_id } => {
                let timer = RevealTimer::start(self.cadence, entry_id, self.event_tx.clone());
                // Replacing a handle drops it, which stops its task
                self.reveal_timer = Some(timer);
            }

            Effect::StopRevealTimer => {
                if let Some(timer) = self.reveal_timer.take() {
                    timer.cancel();
                }
            }
        }
        Ok(())
    }

    /// Report a user scroll. Returns true when the pinned state changed.
    pub fn on_scroll(&mut self, viewport: Viewport) -> bool {
        self.scroll.on_scroll(viewport)
    }

    /// Jump to the newest content and re-pin
    pub fn jump_to_latest(&mut self) -> ScrollAction {
        self.scroll.jump_to_latest()
    }

    /// Scroll instruction produced by the latest log mutation, if not yet consumed
    pub fn take_scroll_action(&mut self) -> Option<ScrollAction> {
        self.pending_scroll.take()
    }

    pub fn view(&self) -> ConversationView<'_> {
        ConversationView {
            entries: self.log.entries(),
            pinned: self.scroll.is_pinned(),
            jump_button_visible: self.scroll.jump_button_visible(),
            busy: self.state.is_busy(),
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    #[allow(dead_code)] // Used in tests
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}
