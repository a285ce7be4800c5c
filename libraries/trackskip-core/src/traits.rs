/// Collaborator traits
///
/// The engine never talks to the platform directly. A host supplies one
/// implementation of each trait at construction time.
use crate::error::Result;
use crate::types::{EngineSettings, PlaybackSnapshot};
use std::sync::Arc;
use std::time::Duration;

/// Read-only view of the user's configuration
///
/// Values may change at any time; the engine calls `current()` once per
/// incoming signal and never caches the result.
pub trait SettingsProvider: Send + Sync {
    fn current(&self) -> EngineSettings;
}

/// Whether a headset-class output (wired, Bluetooth, USB, hearing aid)
/// is currently routed
pub trait AudioRoute: Send + Sync {
    fn is_headset_active(&self) -> bool;
}

/// Engine-initiated volume writes
pub trait VolumeSink: Send + Sync {
    /// Force the media stream volume to `level` without showing UI
    ///
    /// # Errors
    /// Returns an error if the host refused the write
    fn set_level(&self, level: u32) -> Result<()>;
}

/// One playback-capable media session
pub trait MediaEndpoint: Send + Sync {
    /// Identifier for logs (package or player name)
    fn name(&self) -> &str;

    /// Momentary copy of the playback state, `None` if not reported
    fn snapshot(&self) -> Option<PlaybackSnapshot>;

    /// Move the playhead to an absolute position
    ///
    /// # Errors
    /// Returns an error if the endpoint does not implement seeking or the
    /// session went away
    fn seek_to(&self, position: Duration) -> Result<()>;

    /// Coarse forward skip
    ///
    /// # Errors
    /// Returns an error if the command was not delivered
    fn fast_forward(&self) -> Result<()>;

    /// Coarse backward skip
    ///
    /// # Errors
    /// Returns an error if the command was not delivered
    fn rewind(&self) -> Result<()>;
}

/// Current list of active media sessions
///
/// The list is updated by an independent producer; `endpoints()` returns an
/// atomic snapshot that may be one update stale.
pub trait EndpointRegistry: Send + Sync {
    fn endpoints(&self) -> Arc<[Arc<dyn MediaEndpoint>]>;
}

/// Optional user-visible acknowledgement ("+10s")
///
/// Fire-and-forget; implementations must return promptly.
pub trait DebugSurface: Send + Sync {
    fn acknowledge(&self, label: &str);
}

/// Debug surface that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDebugSurface;

impl DebugSurface for SilentDebugSurface {
    fn acknowledge(&self, _label: &str) {}
}
