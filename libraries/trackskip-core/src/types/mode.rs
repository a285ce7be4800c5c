//! Trigger modes and the per-event settings view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How a seek gesture is recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeekTriggerMode {
    /// One press of an external (HID) volume key seeks
    SinglePressHeadset,

    /// Two same-direction volume changes in quick succession seek
    #[default]
    DoublePressVolume,

    /// Every volume change not attributable to the phone's own keys seeks
    SinglePressAnyVolume,
}

impl SeekTriggerMode {
    pub const ALL: [SeekTriggerMode; 3] = [
        SeekTriggerMode::SinglePressHeadset,
        SeekTriggerMode::DoublePressVolume,
        SeekTriggerMode::SinglePressAnyVolume,
    ];

    /// Canonical name
    pub fn as_str(self) -> &'static str {
        match self {
            SeekTriggerMode::SinglePressHeadset => "SINGLE_PRESS_HEADSET",
            SeekTriggerMode::DoublePressVolume => "DOUBLE_PRESS_VOLUME",
            SeekTriggerMode::SinglePressAnyVolume => "SINGLE_PRESS_ANY_VOLUME",
        }
    }

    /// Modes that classify volume samples
    pub fn observes_volume(self) -> bool {
        matches!(
            self,
            SeekTriggerMode::DoublePressVolume | SeekTriggerMode::SinglePressAnyVolume
        )
    }

    /// Next mode in the settings cycle
    pub fn cycle(self) -> Self {
        match self {
            SeekTriggerMode::SinglePressHeadset => SeekTriggerMode::DoublePressVolume,
            SeekTriggerMode::DoublePressVolume => SeekTriggerMode::SinglePressAnyVolume,
            SeekTriggerMode::SinglePressAnyVolume => SeekTriggerMode::SinglePressHeadset,
        }
    }
}

impl fmt::Display for SeekTriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeekTriggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown seek trigger mode: {s}"))
    }
}

/// Timing parameters, all externally supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long after a phone volume key press a same-direction volume
    /// change is attributed to the phone
    pub phone_ignore_window: Duration,

    /// How long volume samples are ignored after a baseline restoration
    pub post_restore_suppress_window: Duration,

    /// Maximum gap between the two halves of a double press
    pub double_press_window: Duration,

    /// Seek distance per gesture
    pub seek_step: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            phone_ignore_window: Duration::from_millis(1_200),
            post_restore_suppress_window: Duration::from_millis(600),
            double_press_window: Duration::from_millis(450),
            seek_step: Duration::from_millis(10_000),
        }
    }
}

/// Everything the engine reads from configuration for one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Master switch; nothing is processed when off
    pub enabled: bool,

    /// Show acknowledgements on the debug surface
    pub debug: bool,

    pub mode: SeekTriggerMode,

    pub timings: Timings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            mode: SeekTriggerMode::default(),
            timings: Timings::default(),
        }
    }
}
