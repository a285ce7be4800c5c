//! Double-press detection
//!
//! Recognizes two same-direction signals no further apart than the
//! double-press window. The first signal opens a pending press; a matching
//! second one completes the gesture and consumes the pending press, so the
//! third signal of a run opens a fresh one.
//!
//! Each path that needs double-press recognition owns its own detector.
//! The pending press carries an anchor value chosen by the owner (the
//! volume path stores the level to restore once the gesture completes).

use std::time::Duration;
use trackskip_core::{Direction, Timestamp};

/// Signals needed to complete one gesture
pub const PRESSES_PER_GESTURE: u32 = 2;

/// An open, not yet completed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPress<A> {
    /// When the sequence started
    pub timestamp: Timestamp,
    pub direction: Direction,
    /// Owner-supplied value captured with the first signal
    pub anchor: A,
    /// Signals seen so far
    pub count: u32,
}

/// Result of registering a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome<A> {
    /// A new sequence was opened with this signal
    Started,
    /// The signal continued a sequence that still needs more signals
    Continued { count: u32 },
    /// The gesture completed; carries the anchor of its first signal
    Completed { anchor: A },
}

/// Two-signal gesture recognizer
#[derive(Debug, Clone)]
pub struct DoublePressDetector<A = ()> {
    pending: Option<PendingPress<A>>,
}

impl<A> Default for DoublePressDetector<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A: Copy> DoublePressDetector<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a directional signal at `at`
    ///
    /// Continues the pending sequence when `at` is within `window` of its
    /// start and the direction matches; otherwise the old sequence is
    /// discarded and a new one anchored at `anchor` begins.
    pub fn register(
        &mut self,
        direction: Direction,
        at: Timestamp,
        window: Duration,
        anchor: A,
    ) -> PressOutcome<A> {
        if let Some(pending) = self.pending.as_mut() {
            if pending.direction == direction && at.is_within(pending.timestamp, window) {
                pending.count += 1;
                if pending.count >= PRESSES_PER_GESTURE {
                    let anchor = pending.anchor;
                    self.pending = None;
                    return PressOutcome::Completed { anchor };
                }
                return PressOutcome::Continued {
                    count: pending.count,
                };
            }
        }

        self.pending = Some(PendingPress {
            timestamp: at,
            direction,
            anchor,
            count: 1,
        });
        PressOutcome::Started
    }

    /// Drop any open sequence
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingPress<A>> {
        self.pending.as_ref()
    }
}
