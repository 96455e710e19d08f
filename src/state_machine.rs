//! Conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! the controller feeds events in and applies the returned effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::ChatState;
pub use transition::{transition, TransitionError, TransitionResult};
