//! Reveal tick scheduling

use crate::conversation::EntryId;
use crate::state_machine::Event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Delay between two revealed characters
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(20);

/// Handle to a running tick task.
///
/// The task stops when the handle is cancelled or dropped, so a discarded
/// controller never receives ticks for a stale log.
pub struct RevealTimer {
    entry_id: EntryId,
    token: CancellationToken,
    _guard: DropGuard,
}

impl RevealTimer {
    /// Emit one `RevealTick` for `entry_id` every `cadence` until cancelled
    /// or until the receiving side goes away.
    pub fn start(cadence: Duration, entry_id: EntryId, event_tx: mpsc::Sender<Event>) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;

                    () = task_token.cancelled() => break,

                    () = tokio::time::sleep(cadence) => {
                        if event_tx.send(Event::RevealTick { entry_id }).await.is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(entry_id = %entry_id, "Reveal timer stopped");
        });

        Self {
            entry_id,
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    pub fn cancel(&self) {
        tracing::debug!(entry_id = %self.entry_id, "Cancelling reveal timer");
        self.token.cancel();
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
