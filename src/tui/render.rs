//! Drawing

use super::App;
use crate::conversation::{EntryStatus, ExchangeEntry};
use crate::dispatch::Dispatcher;
use crate::theme::Palette;
use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use ratatui::Frame;

const TITLE: &str = "Habla con el Sgto. Tomás Rivas";
const PLACEHOLDER: &str = "Haz tu pregunta...";
const SEND_LABEL: &str = "ENVIAR ➤";
const JUMP_LABEL: &str = " ↓ Último ";
const USER_ICON: &str = "👤 ";
const BOT_ICON: &str = "🤖 ";
const ANSWER_INDENT: &str = "   ";

const TYPING_FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl<D: Dispatcher + 'static> App<D> {
    pub fn render(&mut self, frame: &mut Frame) {
        let palette = self.palette();
        let area = frame.area();
        frame.render_widget(
            Block::new().style(Style::new().bg(palette.background).fg(palette.text)),
            area,
        );

        let [header, transcript, input] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(area);

        self.render_header(frame, header, palette);
        self.render_transcript(frame, transcript, palette);
        self.render_input(frame, input, palette);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let title = Line::from(Span::styled(
            TITLE,
            Style::new().fg(palette.primary).add_modifier(Modifier::BOLD),
        ));
        let hints = Line::from(Span::styled(
            "Enter enviar · ↑↓ desplazar · End último · Ctrl+T tema · Esc salir",
            Style::new().fg(palette.text_secondary),
        ));
        frame.render_widget(
            Paragraph::new(vec![title, hints]).alignment(Alignment::Center),
            area,
        );
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect, palette: Palette) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.backdrop().tint()))
            .title(Span::styled(
                format!(" {} ", self.backdrop().image_name()),
                Style::new().fg(palette.text_secondary),
            ))
            .style(Style::new().bg(palette.paper));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let view = self.view();
        let jump_visible = view.jump_button_visible;
        let mut lines = Vec::new();
        for entry in view.entries {
            lines.extend(entry_lines(entry, palette, self.animation_frame));
        }

        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
        self.transcript_rows =
            u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
        self.viewport_rows = inner.height;

        if self.follow_pending {
            self.scroll_offset = self.max_offset();
            self.follow_pending = false;
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_offset());
        }

        frame.render_widget(paragraph.scroll((self.scroll_offset, 0)), inner);

        self.jump_button = None;
        if jump_visible && inner.height > 0 {
            let width = u16::try_from(JUMP_LABEL.chars().count())
                .unwrap_or(u16::MAX)
                .min(inner.width);
            let button = Rect::new(
                inner.right().saturating_sub(width),
                inner.bottom().saturating_sub(1),
                width,
                1,
            );
            frame.render_widget(Clear, button);
            frame.render_widget(
                Paragraph::new(JUMP_LABEL).style(
                    Style::new()
                        .fg(palette.paper)
                        .bg(palette.primary)
                        .add_modifier(Modifier::BOLD),
                ),
                button,
            );
            self.jump_button = Some(button);
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let [field, send] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(12)]).areas(area);

        let field_block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(palette.primary));
        let field_inner = field_block.inner(field);
        let text = if self.input().is_empty() {
            Span::styled(PLACEHOLDER, Style::new().fg(palette.text_secondary))
        } else {
            Span::styled(self.input(), Style::new().fg(palette.text))
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(field_block), field);

        let busy = self.view().busy;
        let label = if busy {
            SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
        } else {
            SEND_LABEL
        };
        let send_style = if busy {
            Style::new().fg(palette.text_secondary)
        } else {
            Style::new().fg(palette.secondary).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, send_style))
                .alignment(Alignment::Center)
                .block(Block::bordered().border_type(BorderType::Rounded).border_style(send_style)),
            send,
        );

        if !busy {
            let typed = u16::try_from(self.input().chars().count()).unwrap_or(u16::MAX);
            let x = field_inner
                .x
                .saturating_add(typed)
                .min(field_inner.right().saturating_sub(1));
            frame.set_cursor_position((x, field_inner.y));
        }
    }
}

/// Lines for one exchange: question (if any), answer, spacer
fn entry_lines(entry: &ExchangeEntry, palette: Palette, animation_frame: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !entry.question.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(USER_ICON, Style::new().fg(palette.primary)),
            Span::styled(entry.question.clone(), Style::new().fg(palette.text)),
            Span::styled(
                format!(" · {}", time_label(entry.asked_at)),
                Style::new().fg(palette.text_secondary),
            ),
        ]));
    }

    let bot = Span::styled(BOT_ICON, Style::new().fg(palette.secondary));
    match entry.status {
        EntryStatus::Pending => {
            let dots = TYPING_FRAMES[animation_frame % TYPING_FRAMES.len()];
            lines.push(Line::from(vec![
                bot,
                Span::styled(dots, Style::new().fg(palette.text_secondary)),
            ]));
        }
        EntryStatus::Revealing | EntryStatus::Complete | EntryStatus::Errored => {
            let style = if entry.status == EntryStatus::Errored {
                Style::new().fg(palette.secondary).add_modifier(Modifier::ITALIC)
            } else {
                Style::new().fg(palette.text_secondary)
            };
            for (i, part) in entry.answer.split('\n').enumerate() {
                let lead = if i == 0 {
                    bot.clone()
                } else {
                    Span::raw(ANSWER_INDENT)
                };
                lines.push(Line::from(vec![lead, Span::styled(part.to_string(), style)]));
            }
        }
    }

    lines.push(Line::default());
    lines
}

/// Local wall-clock time of a question
fn time_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}
