//! Conversation log
//!
//! The ordered record of every exchange shown to the user. The controller
//! is the only writer.

mod entry;
mod log;

pub use entry::{EntryId, EntryStatus, ExchangeEntry, WELCOME_GREETING};
pub use log::{ConversationLog, LogError};
