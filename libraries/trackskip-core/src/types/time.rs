//! Monotonic timestamps
//!
//! Hosts stamp every signal with a reading of their monotonic clock
//! (uptime in milliseconds). All engine windows are evaluated by comparing
//! these readings when the next signal arrives; nothing is scheduled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// A monotonic clock reading in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Clock origin
    pub const ZERO: Self = Self(0);

    /// Create from milliseconds since the clock origin
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the clock origin
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, or zero if `earlier` is in the future
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Whether `earlier` happened no more than `window` before `self`
    ///
    /// A timestamp in the future of `self` is never within the window.
    pub fn is_within(self, earlier: Timestamp, window: Duration) -> bool {
        earlier <= self && self.saturating_since(earlier) <= window
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
