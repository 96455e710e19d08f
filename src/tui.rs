//! Terminal front-end
//!
//! Renders the conversation and forwards key, mouse and scroll input to
//! the controller. Everything runs on one loop: terminal input, dispatch
//! results and reveal ticks are multiplexed with `tokio::select!`.

mod app;
mod render;

pub use app::{App, Flow};

use crate::dispatch::Dispatcher;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

/// Typing indicator and spinner frame rate
const ANIMATION_INTERVAL: Duration = Duration::from_millis(150);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the UI until the user quits
pub async fn run<D: Dispatcher + 'static>(mut app: App<D>) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    app.shutdown();
    result
}

async fn event_loop<D: Dispatcher + 'static>(terminal: &mut Tui, app: &mut App<D>) -> io::Result<()> {
    let mut terminal_events = EventStream::new();
    let mut animation = tokio::time::interval(ANIMATION_INTERVAL);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            term_event = terminal_events.next() => match term_event {
                Some(Ok(event)) => {
                    if app.on_terminal_event(&event) == Flow::Quit {
                        return Ok(());
                    }
                }
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },

            Some(chat_event) = app.next_chat_event() => app.on_chat_event(chat_event),

            _ = animation.tick() => app.advance_animation(),
        }
    }
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Leave the terminal usable if anything panics while drawing
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()
}
