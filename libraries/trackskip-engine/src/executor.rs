//! Seek execution
//!
//! Turns a seek decision into a concrete target position on the best
//! available endpoint. A direct seek is tried first; endpoints that refuse
//! fine-grained seeking get a coarse fast-forward or rewind instead.

use crate::position::estimate_position;
use crate::selector::{select_best, Selection};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use trackskip_core::{Direction, EndpointRegistry, Result, SeekError, Timestamp};

/// A recognized seek gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekDecision {
    pub direction: Direction,
    pub step: Duration,
}

impl SeekDecision {
    pub fn new(direction: Direction, step: Duration) -> Self {
        Self { direction, step }
    }

    /// Signed distance in milliseconds
    pub fn delta_millis(&self) -> i128 {
        i128::from(self.direction.sign()) * self.step.as_millis() as i128
    }

    /// Short acknowledgement label, e.g. `+10s`
    ///
    /// Steps that are not whole seconds are shown in milliseconds (`+500ms`).
    pub fn label(&self) -> String {
        let sign = match self.direction {
            Direction::Up => '+',
            Direction::Down => '-',
        };
        if self.step.subsec_nanos() == 0 {
            format!("{}{}s", sign, self.step.as_secs())
        } else {
            format!("{}{}ms", sign, self.step.as_millis())
        }
    }
}

/// How the playhead was moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekMethod {
    /// Absolute seek to the computed target
    SeekTo,
    /// Coarse fast-forward
    FastForward,
    /// Coarse rewind
    Rewind,
}

/// What a successful seek did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekReport {
    /// Endpoint name
    pub endpoint: String,
    /// Target that was computed (and sent, for `SeekMethod::SeekTo`)
    pub target: Duration,
    pub method: SeekMethod,
}

/// Compute the absolute target for a seek
///
/// `estimated + delta`, clamped to `[0, duration]`; unbounded above when
/// the duration is unknown.
pub fn seek_target(estimated: Duration, delta_millis: i128, duration: Option<Duration>) -> Duration {
    let raw = estimated.as_millis() as i128 + delta_millis;
    let upper = duration.map_or(i128::from(u64::MAX), |d| d.as_millis() as i128);
    let clamped = raw.clamp(0, upper.max(0));
    Duration::from_millis(u64::try_from(clamped).unwrap_or(u64::MAX))
}

/// Issues seeks against whatever endpoint the registry currently ranks best
#[derive(Clone)]
pub struct SeekExecutor {
    registry: Arc<dyn EndpointRegistry>,
}

impl SeekExecutor {
    pub fn new(registry: Arc<dyn EndpointRegistry>) -> Self {
        Self { registry }
    }

    /// Best endpoint right now, if any
    pub fn select(&self) -> Option<Selection> {
        let endpoints = self.registry.endpoints();
        select_best(&endpoints)
    }

    /// Whether a seek would have an endpoint to go to
    pub fn has_seekable_endpoint(&self) -> bool {
        !self.registry.endpoints().is_empty()
    }

    /// Seek the best endpoint by the decision's signed step
    ///
    /// # Errors
    /// - `NoEligibleEndpoint` when the registry is empty
    /// - `NoPlaybackState` when the chosen endpoint has no snapshot
    /// - `Rejected` when both the direct seek and the fallback fail
    pub fn seek_by(&self, decision: SeekDecision, now: Timestamp) -> Result<SeekReport> {
        let Selection { endpoint, snapshot } = self.select().ok_or(SeekError::NoEligibleEndpoint)?;
        let snapshot = snapshot.ok_or(SeekError::NoPlaybackState)?;

        let current = estimate_position(&snapshot, now);
        let target = seek_target(current, decision.delta_millis(), snapshot.duration);
        debug!(
            endpoint = endpoint.name(),
            current_ms = current.as_millis() as u64,
            target_ms = target.as_millis() as u64,
            "Seeking"
        );

        let seek_err = match endpoint.seek_to(target) {
            Ok(()) => {
                info!(endpoint = endpoint.name(), target_ms = target.as_millis() as u64, "Seek issued");
                return Ok(SeekReport {
                    endpoint: endpoint.name().to_string(),
                    target,
                    method: SeekMethod::SeekTo,
                });
            }
            Err(e) => e,
        };

        let (method, fallback) = match decision.direction {
            Direction::Up => (SeekMethod::FastForward, endpoint.fast_forward()),
            Direction::Down => (SeekMethod::Rewind, endpoint.rewind()),
        };

        match fallback {
            Ok(()) => {
                info!(
                    endpoint = endpoint.name(),
                    ?method,
                    "Direct seek refused ({}), used transport fallback",
                    seek_err
                );
                Ok(SeekReport {
                    endpoint: endpoint.name().to_string(),
                    target,
                    method,
                })
            }
            Err(fallback_err) => {
                warn!(endpoint = endpoint.name(), "Seek rejected: {}; fallback: {}", seek_err, fallback_err);
                Err(SeekError::Rejected {
                    seek_to: seek_err.to_string(),
                    fallback: fallback_err.to_string(),
                })
            }
        }
    }
}
