//! Playback position estimation
//!
//! Endpoints report their position as a point sample. Between samples the
//! playhead keeps moving at `speed`, so the current position is
//! extrapolated from the last update.

use std::time::Duration;
use trackskip_core::{PlaybackSnapshot, Timestamp};

/// Estimate where playback is at `now`
///
/// Returns the recorded position unchanged when the endpoint is not
/// playing, never reported an update time, or has a zero (or non-finite)
/// speed. Otherwise returns
/// `position + (now - last_update) * speed`, clamped at zero.
///
/// Pure: the same snapshot and `now` always give the same answer.
pub fn estimate_position(snapshot: &PlaybackSnapshot, now: Timestamp) -> Duration {
    let recorded = snapshot.position;

    if !snapshot.is_playing() {
        return recorded;
    }

    let Some(last_update) = snapshot.last_update.filter(|t| *t > Timestamp::ZERO) else {
        return recorded;
    };

    let speed = f64::from(snapshot.speed);
    if speed == 0.0 || !speed.is_finite() {
        return recorded;
    }

    let elapsed_ms = now.saturating_since(last_update).as_millis() as f64;
    let estimated_ms = recorded.as_millis() as f64 + elapsed_ms * speed;

    if estimated_ms <= 0.0 {
        Duration::ZERO
    } else {
        Duration::from_millis(estimated_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackskip_core::PlaybackStatus;

    fn playing_at(position_ms: u64, updated_ms: u64, speed: f32) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position: Duration::from_millis(position_ms),
            last_update: Some(Timestamp::from_millis(updated_ms)),
            speed,
            status: PlaybackStatus::Playing,
            ..Default::default()
        }
    }

    #[test]
    fn extrapolates_while_playing() {
        let snapshot = playing_at(30_000, 1_000, 1.0);
        let now = Timestamp::from_millis(3_500);
        assert_eq!(estimate_position(&snapshot, now), Duration::from_millis(32_500));
    }

    #[test]
    fn honours_playback_speed() {
        let snapshot = playing_at(10_000, 1_000, 2.0);
        let now = Timestamp::from_millis(2_000);
        assert_eq!(estimate_position(&snapshot, now), Duration::from_millis(12_000));
    }

    #[test]
    fn paused_position_is_not_extrapolated() {
        let snapshot = PlaybackSnapshot {
            status: PlaybackStatus::Paused,
            ..playing_at(30_000, 1_000, 1.0)
        };
        let now = Timestamp::from_millis(60_000);
        assert_eq!(estimate_position(&snapshot, now), Duration::from_millis(30_000));
    }

    #[test]
    fn missing_update_time_returns_recorded_position() {
        let mut snapshot = playing_at(5_000, 0, 1.0);
        assert_eq!(
            estimate_position(&snapshot, Timestamp::from_millis(9_000)),
            Duration::from_millis(5_000)
        );

        snapshot.last_update = None;
        assert_eq!(
            estimate_position(&snapshot, Timestamp::from_millis(9_000)),
            Duration::from_millis(5_000)
        );
    }

    #[test]
    fn zero_speed_returns_recorded_position() {
        let snapshot = playing_at(5_000, 1_000, 0.0);
        assert_eq!(
            estimate_position(&snapshot, Timestamp::from_millis(9_000)),
            Duration::from_millis(5_000)
        );
    }

    #[test]
    fn reverse_playback_clamps_at_zero() {
        let snapshot = playing_at(1_000, 1_000, -1.0);
        assert_eq!(
            estimate_position(&snapshot, Timestamp::from_millis(5_000)),
            Duration::ZERO
        );
    }

    #[test]
    fn update_in_the_future_does_not_rewind() {
        let snapshot = playing_at(7_000, 10_000, 1.0);
        assert_eq!(
            estimate_position(&snapshot, Timestamp::from_millis(9_000)),
            Duration::from_millis(7_000)
        );
    }
}
