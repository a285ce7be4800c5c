//! Playback snapshots reported by media endpoints

use super::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state of a media endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Waiting for data
    Buffering,

    /// Stopped, errored, connecting, or anything else
    #[default]
    Other,
}

impl PlaybackStatus {
    /// Ranking score used when several endpoints are equally capable
    pub fn score(self) -> u8 {
        match self {
            PlaybackStatus::Playing => 3,
            PlaybackStatus::Paused => 2,
            PlaybackStatus::Buffering => 1,
            PlaybackStatus::Other => 0,
        }
    }
}

/// A momentary copy of an endpoint's playback state
///
/// `position` was sampled at `last_update`; playback keeps moving between
/// samples, so callers extrapolate before using it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Position at the time of the last update
    pub position: Duration,

    /// When `position` was sampled; `None` if the endpoint never reported
    pub last_update: Option<Timestamp>,

    /// Playback rate (1.0 = normal)
    pub speed: f32,

    pub status: PlaybackStatus,

    /// Track duration, `None` when unknown (live streams, missing metadata)
    pub duration: Option<Duration>,

    pub supports_seek_to: bool,
    pub supports_fast_forward: bool,
    pub supports_rewind: bool,
}

impl PlaybackSnapshot {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Both coarse transport commands are available
    pub fn supports_fast_forward_rewind(&self) -> bool {
        self.supports_fast_forward && self.supports_rewind
    }

    /// Some way of moving the playhead exists
    pub fn is_seekable(&self) -> bool {
        self.supports_seek_to || self.supports_fast_forward_rewind()
    }
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            last_update: None,
            speed: 1.0,
            status: PlaybackStatus::Other,
            duration: None,
            supports_seek_to: false,
            supports_fast_forward: false,
            supports_rewind: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_scores_are_ordered() {
        assert!(PlaybackStatus::Playing.score() > PlaybackStatus::Paused.score());
        assert!(PlaybackStatus::Paused.score() > PlaybackStatus::Buffering.score());
        assert!(PlaybackStatus::Buffering.score() > PlaybackStatus::Other.score());
    }

    #[test]
    fn seekable_needs_seek_or_both_transport_commands() {
        let mut snapshot = PlaybackSnapshot::default();
        assert!(!snapshot.is_seekable());

        snapshot.supports_fast_forward = true;
        assert!(!snapshot.is_seekable());

        snapshot.supports_rewind = true;
        assert!(snapshot.is_seekable());

        let direct = PlaybackSnapshot {
            supports_seek_to: true,
            ..Default::default()
        };
        assert!(direct.is_seekable());
    }
}
