/// Core error types for TrackSkip
use thiserror::Error;

/// Result type alias using `SeekError`
pub type Result<T> = std::result::Result<T, SeekError>;

/// Everything that can go wrong between a seek decision and the host.
///
/// None of these are fatal: the engine logs them and lets the host's
/// default handling of the triggering signal proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeekError {
    /// No playback endpoint is currently registered
    #[error("No eligible media endpoint")]
    NoEligibleEndpoint,

    /// The chosen endpoint did not report a playback snapshot
    #[error("Media endpoint has no playback state")]
    NoPlaybackState,

    /// Both the direct seek and the coarse fallback were refused
    #[error("Seek rejected by endpoint (seek-to: {seek_to}; fallback: {fallback})")]
    Rejected {
        /// Why the direct seek failed
        seek_to: String,
        /// Why the fast-forward/rewind fallback failed
        fallback: String,
    },

    /// A collaborator call (volume write, transport command, ...) failed
    #[error("Host call failed: {0}")]
    Host(String),
}

impl SeekError {
    /// Create a host error
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Whether the failure happened before any endpoint was contacted
    pub fn is_selection_failure(&self) -> bool {
        matches!(self, Self::NoEligibleEndpoint | Self::NoPlaybackState)
    }
}
