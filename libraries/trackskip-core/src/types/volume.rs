//! Volume level samples

use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// One observation of the host's media volume level
///
/// Delivered on every volume change from any origin (phone keys, headset
/// keys with absolute volume, other apps, our own restorations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSample {
    pub level: u32,
    pub timestamp: Timestamp,
}

impl VolumeSample {
    pub fn new(level: u32, timestamp: Timestamp) -> Self {
        Self { level, timestamp }
    }
}
