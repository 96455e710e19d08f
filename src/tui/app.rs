//! UI state and input handling

use crate::dispatch::Dispatcher;
use crate::runtime::{AskOutcome, ControllerError, ConversationController, ConversationView};
use crate::scroll::{ScrollAction, Viewport};
use crate::state_machine::{Event, TransitionError};
use crate::theme::{Backdrop, Palette, ThemeController};
use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

/// Viewport units per terminal row
pub const ROW_UNITS: f32 = 16.0;

const WHEEL_ROWS: i32 = 3;

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<D: Dispatcher + 'static> {
    controller: ConversationController<D>,
    theme: ThemeController,
    backdrop: Backdrop,
    input: String,
    /// First transcript row shown
    pub(super) scroll_offset: u16,
    /// Measured at the last render
    pub(super) transcript_rows: u16,
    pub(super) viewport_rows: u16,
    /// Scroll to the bottom at the next render
    pub(super) follow_pending: bool,
    pub(super) jump_button: Option<Rect>,
    pub(super) animation_frame: usize,
}

impl<D: Dispatcher + 'static> App<D> {
    pub fn new(controller: ConversationController<D>, theme: ThemeController, backdrop: Backdrop) -> Self {
        Self {
            controller,
            theme,
            backdrop,
            input: String::new(),
            scroll_offset: 0,
            transcript_rows: 0,
            viewport_rows: 0,
            follow_pending: true,
            jump_button: None,
            animation_frame: 0,
        }
    }

    pub fn view(&self) -> ConversationView<'_> {
        self.controller.view()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    pub async fn next_chat_event(&mut self) -> Option<Event> {
        self.controller.next_event().await
    }

    pub fn on_chat_event(&mut self, event: Event) {
        if let Err(e) = self.controller.handle_event(event) {
            tracing::error!(error = %e, "Failed to apply conversation event");
        }
        self.consume_scroll_action();
    }

    pub fn advance_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    pub fn on_terminal_event(&mut self, event: &TermEvent) -> Flow {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => self.on_key(*key),
            TermEvent::Mouse(mouse) => {
                self.on_mouse(*mouse);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('t') if ctrl => {
                let mode = self.theme.toggle();
                tracing::debug!(?mode, "Theme toggled");
            }
            KeyCode::Enter if !key.modifiers.contains(KeyModifiers::SHIFT) => self.submit(),
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-i32::from(self.viewport_rows.max(1))),
            KeyCode::PageDown => self.scroll_by(i32::from(self.viewport_rows.max(1))),
            KeyCode::End => self.jump_to_latest(),
            _ => {}
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .jump_button
                    .is_some_and(|rect| rect.contains(Position::new(mouse.column, mouse.row)));
                if hit {
                    self.jump_to_latest();
                }
            }
            _ => {}
        }
    }

    /// Send the typed question. Disabled while an answer is in progress.
    fn submit(&mut self) {
        if self.controller.is_busy() {
            return;
        }
        let question = std::mem::take(&mut self.input);
        match self.controller.ask(&question) {
            Ok(AskOutcome::Dispatched(_) | AskOutcome::Ignored) => {}
            Err(e) => {
                if !matches!(e, ControllerError::Transition(TransitionError::Busy)) {
                    tracing::error!(error = %e, "Failed to submit question");
                }
                // Keep the text so it can be sent again
                self.input = question;
            }
        }
        self.consume_scroll_action();
    }

    fn jump_to_latest(&mut self) {
        if self.controller.jump_to_latest() == ScrollAction::SmoothScrollToBottom {
            self.follow_pending = true;
        }
    }

    fn consume_scroll_action(&mut self) {
        match self.controller.take_scroll_action() {
            Some(ScrollAction::FollowLatest | ScrollAction::SmoothScrollToBottom) => {
                self.follow_pending = true;
            }
            Some(ScrollAction::ShowJumpButton) | None => {}
        }
    }

    pub(super) fn max_offset(&self) -> u16 {
        self.transcript_rows.saturating_sub(self.viewport_rows)
    }

    fn scroll_by(&mut self, rows: i32) {
        let next = (i32::from(self.scroll_offset) + rows).clamp(0, i32::from(self.max_offset()));
        self.scroll_offset = u16::try_from(next).unwrap_or_else(|_| self.max_offset());
        self.follow_pending = false;
        self.controller.on_scroll(self.viewport());
    }

    pub(super) fn viewport(&self) -> Viewport {
        Viewport {
            scroll_height: f32::from(self.transcript_rows) * ROW_UNITS,
            scroll_top: f32::from(self.scroll_offset) * ROW_UNITS,
            client_height: f32::from(self.viewport_rows) * ROW_UNITS,
        }
    }
}
