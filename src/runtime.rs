//! Runtime for driving a conversation
//!
//! The controller owns the log and is its only writer. Dispatch results
//! and reveal ticks come back as events on one channel, so every
//! mutation happens in order on the caller's loop.

mod controller;

#[cfg(test)]
pub mod testing;

pub use controller::{AskOutcome, ControllerError, ConversationController, ConversationView};
