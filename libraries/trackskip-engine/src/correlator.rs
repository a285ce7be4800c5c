//! Phone-key correlation
//!
//! Remembers the most recent press of the phone's own volume keys so a
//! volume change that follows it can be attributed to the phone rather than
//! to a headset.
//!
//! This is a timing heuristic. A headset press in the same direction within
//! the ignore window is indistinguishable from the phone press and is
//! treated as phone-originated; widening the window trades missed headset
//! gestures for fewer phone-triggered seeks.

use std::time::Duration;
use trackskip_core::{Direction, Timestamp};

/// The last phone volume key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneKeyMark {
    pub timestamp: Timestamp,
    pub direction: Direction,
}

/// Single-slot record of phone volume key presses
#[derive(Debug, Clone, Default)]
pub struct PhoneKeyCorrelator {
    last: Option<PhoneKeyMark>,
}

impl PhoneKeyCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a phone volume key press, replacing any earlier one
    pub fn mark(&mut self, direction: Direction, timestamp: Timestamp) {
        self.last = Some(PhoneKeyMark {
            timestamp,
            direction,
        });
    }

    /// Whether a same-direction phone key was pressed within `window`
    /// before `timestamp`
    pub fn is_likely_from_phone(
        &self,
        direction: Direction,
        timestamp: Timestamp,
        window: Duration,
    ) -> bool {
        self.last.is_some_and(|mark| {
            mark.direction == direction && timestamp.is_within(mark.timestamp, window)
        })
    }

    pub fn last_mark(&self) -> Option<PhoneKeyMark> {
        self.last
    }
}
