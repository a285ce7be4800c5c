//! Domain types for TrackSkip

pub mod key;
pub mod mode;
pub mod playback;
pub mod time;
pub mod volume;

pub use key::{Direction, InputDeviceInfo, KeyAction, KeyCode, KeyEvent};
pub use mode::{EngineSettings, SeekTriggerMode, Timings};
pub use playback::{PlaybackSnapshot, PlaybackStatus};
pub use time::Timestamp;
pub use volume::VolumeSample;
