//! Endpoint selection
//!
//! Picks the media session a seek should go to. Endpoints that can move
//! the playhead (direct seek, or both fast-forward and rewind) rank first;
//! among equals, playing beats paused beats buffering beats anything else.
//! Exact ties keep registry order.

use std::sync::Arc;
use trackskip_core::{MediaEndpoint, PlaybackSnapshot};

/// The chosen endpoint together with the snapshot it was ranked on
#[derive(Clone)]
pub struct Selection {
    pub endpoint: Arc<dyn MediaEndpoint>,
    pub snapshot: Option<PlaybackSnapshot>,
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("endpoint", &self.endpoint.name())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

/// Ranking key, compared descending
///
/// An endpoint without a snapshot ranks as incapable with score 0.
pub fn rank(snapshot: Option<&PlaybackSnapshot>) -> (bool, u8) {
    snapshot.map_or((false, 0), |s| (s.is_seekable(), s.status.score()))
}

/// Choose the best endpoint, `None` only for an empty candidate list
///
/// Each candidate's snapshot is read exactly once.
pub fn select_best(candidates: &[Arc<dyn MediaEndpoint>]) -> Option<Selection> {
    let mut best: Option<((bool, u8), Selection)> = None;

    for endpoint in candidates {
        let snapshot = endpoint.snapshot();
        let key = rank(snapshot.as_ref());

        // Strictly greater only, so the earliest of equal candidates wins
        let better = match &best {
            None => true,
            Some((best_key, _)) => key > *best_key,
        };
        if better {
            best = Some((
                key,
                Selection {
                    endpoint: Arc::clone(endpoint),
                    snapshot,
                },
            ));
        }
    }

    best.map(|(_, selection)| selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use trackskip_core::{PlaybackStatus, Result};

    struct Fixed {
        name: &'static str,
        snapshot: Option<PlaybackSnapshot>,
    }

    impl MediaEndpoint for Fixed {
        fn name(&self) -> &str {
            self.name
        }
        fn snapshot(&self) -> Option<PlaybackSnapshot> {
            self.snapshot
        }
        fn seek_to(&self, _position: Duration) -> Result<()> {
            Ok(())
        }
        fn fast_forward(&self) -> Result<()> {
            Ok(())
        }
        fn rewind(&self) -> Result<()> {
            Ok(())
        }
    }

    fn endpoint(
        name: &'static str,
        status: PlaybackStatus,
        seek: bool,
        ff_rw: bool,
    ) -> Arc<dyn MediaEndpoint> {
        Arc::new(Fixed {
            name,
            snapshot: Some(PlaybackSnapshot {
                status,
                supports_seek_to: seek,
                supports_fast_forward: ff_rw,
                supports_rewind: ff_rw,
                ..Default::default()
            }),
        })
    }

    fn picked(candidates: &[Arc<dyn MediaEndpoint>]) -> Option<String> {
        select_best(candidates).map(|s| s.endpoint.name().to_string())
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn capability_outranks_playback_state() {
        let candidates = vec![
            endpoint("radio", PlaybackStatus::Playing, false, false),
            endpoint("podcast", PlaybackStatus::Paused, true, false),
        ];
        assert_eq!(picked(&candidates).as_deref(), Some("podcast"));
    }

    #[test]
    fn transport_pair_counts_as_capable() {
        let candidates = vec![
            endpoint("radio", PlaybackStatus::Playing, false, false),
            endpoint("legacy", PlaybackStatus::Buffering, false, true),
        ];
        assert_eq!(picked(&candidates).as_deref(), Some("legacy"));
    }

    #[test]
    fn playback_state_breaks_capability_ties() {
        let candidates = vec![
            endpoint("buffering", PlaybackStatus::Buffering, true, false),
            endpoint("paused", PlaybackStatus::Paused, true, false),
            endpoint("playing", PlaybackStatus::Playing, true, false),
        ];
        assert_eq!(picked(&candidates).as_deref(), Some("playing"));
    }

    #[test]
    fn exact_ties_keep_registry_order() {
        let candidates = vec![
            endpoint("first", PlaybackStatus::Paused, true, false),
            endpoint("second", PlaybackStatus::Paused, true, false),
        ];
        assert_eq!(picked(&candidates).as_deref(), Some("first"));
    }

    #[test]
    fn endpoint_without_snapshot_is_still_selectable() {
        let candidates: Vec<Arc<dyn MediaEndpoint>> = vec![Arc::new(Fixed {
            name: "silent",
            snapshot: None,
        })];
        let selection = select_best(&candidates).unwrap();
        assert_eq!(selection.endpoint.name(), "silent");
        assert!(selection.snapshot.is_none());
    }
}
