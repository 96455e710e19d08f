//! Rivas Chat - terminal chat with a Battle of Ayacucho veteran
//!
//! Questions go to an answer backend; answers are revealed one
//! character at a time while the transcript follows the latest exchange.

mod config;
mod conversation;
mod dispatch;
mod reveal;
mod runtime;
mod scroll;
mod state_machine;
mod theme;
mod tui;

use config::ChatConfig;
use runtime::ConversationController;
use std::fs::OpenOptions;
use std::sync::Mutex;
use theme::{Backdrop, ThemeController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChatConfig::from_env();

    // The terminal belongs to the UI, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rivas_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    tracing::info!(
        endpoint = %config.endpoint,
        backend = ?config.backend,
        cadence_ms = config.reveal_cadence.as_millis(),
        "Starting chat"
    );

    let dispatcher = config.build_dispatcher()?;
    let controller = ConversationController::new(dispatcher, config.reveal_cadence);
    let backdrop = Backdrop::pick(&mut rand::thread_rng());
    tracing::debug!(backdrop = %backdrop.image_name(), "Backdrop chosen");

    tui::run(tui::App::new(controller, ThemeController::default(), backdrop)).await?;

    tracing::info!("Chat closed");
    Ok(())
}
