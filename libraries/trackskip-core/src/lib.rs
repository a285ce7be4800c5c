//! TrackSkip Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared
//! by the TrackSkip seek-trigger engine and its hosts.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Signals**: `KeyEvent`, `VolumeSample`, stamped with a monotonic `Timestamp`
//! - **Playback view**: `PlaybackSnapshot`, `PlaybackStatus`
//! - **Configuration view**: `EngineSettings`, `SeekTriggerMode`, `Timings`
//! - **Collaborators**: `SettingsProvider`, `AudioRoute`, `VolumeSink`,
//!   `MediaEndpoint`, `EndpointRegistry`, `DebugSurface`
//! - **Error Handling**: `SeekError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use trackskip_core::{Direction, KeyCode, KeyEvent, Timestamp};
//!
//! let event = KeyEvent::down(KeyCode::VolumeUp, true, Timestamp::from_millis(1_000));
//! assert!(event.is_initial_press());
//! assert_eq!(event.code.volume_direction(), Some(Direction::Up));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, SeekError};
pub use traits::{
    AudioRoute, DebugSurface, EndpointRegistry, MediaEndpoint, SettingsProvider,
    SilentDebugSurface, VolumeSink,
};
pub use types::{
    Direction, EngineSettings, InputDeviceInfo, KeyAction, KeyCode, KeyEvent, PlaybackSnapshot,
    PlaybackStatus, SeekTriggerMode, Timestamp, Timings, VolumeSample,
};
