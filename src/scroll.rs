//! Viewport follow behavior
//!
//! Tracks whether the transcript is pinned to its newest content. While
//! pinned, every log change scrolls to the bottom; once the user scrolls
//! away, changes only surface the jump-to-latest button.

/// Distance from the bottom, in viewport units, under which the view counts as pinned
pub const PIN_THRESHOLD: f32 = 50.0;

/// Scroll measurements reported by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Total content height
    pub scroll_height: f32,
    /// Offset of the visible top edge
    pub scroll_top: f32,
    /// Visible height
    pub client_height: f32,
}

impl Viewport {
    pub fn distance_from_bottom(&self) -> f32 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// What the presentation layer should do after a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Scroll to the newest content
    FollowLatest,
    /// Leave the position alone and show the jump-to-latest button
    ShowJumpButton,
    /// Smoothly scroll to the bottom (explicit jump)
    SmoothScrollToBottom,
}

#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    pinned: bool,
    threshold: f32,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::with_threshold(PIN_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            pinned: true,
            threshold,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn jump_button_visible(&self) -> bool {
        !self.pinned
    }

    /// Called after every log mutation
    pub fn on_log_mutated(&self) -> ScrollAction {
        if self.pinned {
            ScrollAction::FollowLatest
        } else {
            ScrollAction::ShowJumpButton
        }
    }

    /// Recompute the pinned flag from a user scroll. Returns true when it changed.
    pub fn on_scroll(&mut self, viewport: Viewport) -> bool {
        let pinned = viewport.distance_from_bottom() < self.threshold;
        let changed = pinned != self.pinned;
        if changed {
            tracing::debug!(
                pinned,
                distance = viewport.distance_from_bottom(),
                "Scroll follow state changed"
            );
        }
        self.pinned = pinned;
        changed
    }

    /// Explicit jump to the newest content; re-pins the view
    pub fn jump_to_latest(&mut self) -> ScrollAction {
        self.pinned = true;
        ScrollAction::SmoothScrollToBottom
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
