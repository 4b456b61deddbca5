//! Card gesture recognizers
//!
//! Both recognizers are driven by the host's pointer events and take the
//! event instant as an argument, so they never read a clock themselves.

use crate::config::{DRAG_DELETE_THRESHOLD, DRAG_ELASTIC_LEFT, DRAG_ELASTIC_RIGHT, LONG_PRESS_MS};
use std::time::{Duration, Instant};

/// Long-press detector for a single card.
///
/// A press arms a deadline. The press fires once the deadline passes; any
/// release, pointer-leave or pointer-move before that cancels it. The host
/// calls [`LongPress::poll`] from its timer tick.
#[derive(Debug, Clone)]
pub struct LongPress {
    duration: Duration,
    pressed_at: Option<Instant>,
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(Duration::from_millis(LONG_PRESS_MS))
    }
}

impl LongPress {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pressed_at: None,
        }
    }

    /// Pointer went down (mouse down or touch start)
    pub fn press(&mut self, at: Instant) {
        self.pressed_at = Some(at);
    }

    /// Whether a press is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Instant at which the armed press fires
    pub fn deadline(&self) -> Option<Instant> {
        self.pressed_at.map(|at| at + self.duration)
    }

    /// Returns `true` exactly once per press, when `now` has reached the
    /// deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.pressed_at = None;
                tracing::debug!("Long press fired");
                true
            }
            _ => false,
        }
    }

    /// Pointer went up (mouse up or touch end)
    pub fn release(&mut self, now: Instant) -> bool {
        self.cancel(now)
    }

    /// Pointer left the card
    pub fn leave(&mut self, now: Instant) -> bool {
        self.cancel(now)
    }

    /// Touch moved
    pub fn pointer_move(&mut self, now: Instant) -> bool {
        self.cancel(now)
    }

    // A deadline that passed before the cancelling event still fires, as if
    // the host's timer tick had run first.
    fn cancel(&mut self, now: Instant) -> bool {
        let fired = self.poll(now);
        self.pressed_at = None;
        fired
    }
}

/// What a finished drag asks of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released past the threshold; delete the card
    Delete,
    /// Released short of the threshold; the card returns to rest
    SpringBack,
    /// No drag was in progress
    Ignored,
}

/// Horizontal swipe-to-delete tracker.
///
/// Only the horizontal component of the pointer offset is used. The card's
/// visual offset lags the pointer with stronger resistance to the right.
#[derive(Debug, Clone, Default)]
pub struct SwipeToDelete {
    dragging: bool,
    pointer_dx: f64,
}

impl SwipeToDelete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag. Refused when the card does not allow dragging.
    pub fn start(&mut self, enabled: bool) -> bool {
        self.pointer_dx = 0.0;
        self.dragging = enabled;
        enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer offset from where the drag started
    pub fn drag_to(&mut self, dx: f64) {
        if self.dragging {
            self.pointer_dx = dx;
        }
    }

    /// Horizontal translation to render the card at
    pub fn offset(&self) -> f64 {
        let factor = if self.pointer_dx < 0.0 {
            DRAG_ELASTIC_LEFT
        } else {
            DRAG_ELASTIC_RIGHT
        };
        self.pointer_dx * factor
    }

    /// End the drag. The offset is back at rest afterwards whatever the
    /// outcome.
    pub fn release(&mut self) -> DragOutcome {
        if !self.dragging {
            return DragOutcome::Ignored;
        }

        let dx = self.pointer_dx;
        self.dragging = false;
        self.pointer_dx = 0.0;

        if dx < DRAG_DELETE_THRESHOLD {
            tracing::debug!("Swipe released at {}, deleting", dx);
            DragOutcome::Delete
        } else {
            DragOutcome::SpringBack
        }
    }
}
