/// Trace file format
use serde::Deserialize;
use trackskip_core::{InputDeviceInfo, KeyAction, KeyCode, PlaybackStatus};
use trackskip_settings::TimingField;

#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    /// Media volume when the trace starts
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u32,

    /// Highest volume index the simulated stream accepts
    #[serde(default = "default_max_volume")]
    pub max_volume: u32,

    #[serde(default = "default_headset")]
    pub headset: bool,

    #[serde(default)]
    pub sessions: Vec<SessionSpec>,

    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// A key event delivered to the engine
    Key {
        at: u64,
        code: KeyCode,
        /// Raw external flag, used when no `device` is given
        #[serde(default)]
        external: bool,
        /// Input device the event came from
        #[serde(default)]
        device: Option<InputDeviceInfo>,
        #[serde(default)]
        action: KeyAction,
        #[serde(default)]
        repeat: bool,
    },

    /// The stream volume moved without a key event (absolute volume headsets)
    Volume { at: u64, level: u32 },

    /// Headset plugged or unplugged
    Headset { connected: bool },

    /// The active session list changed
    Sessions { sessions: Vec<SessionSpec> },

    /// The user edited settings mid-trace
    Settings {
        #[serde(default)]
        enabled: Option<bool>,
        #[serde(default)]
        debug: Option<bool>,
        /// Advance to the next trigger mode
        #[serde(default)]
        cycle_mode: bool,
        /// Text typed into a timing field
        #[serde(default)]
        timing: Option<TimingInput>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingInput {
    pub field: TimingField,
    pub value: String,
}

impl Step {
    pub fn at(&self) -> Option<u64> {
        match self {
            Step::Key { at, .. } | Step::Volume { at, .. } => Some(*at),
            Step::Headset { .. } | Step::Sessions { .. } | Step::Settings { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSpec {
    pub name: String,

    #[serde(default)]
    pub position_ms: u64,

    /// Clock reading the position was reported at
    #[serde(default)]
    pub updated_at: u64,

    #[serde(default)]
    pub status: PlaybackStatus,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default)]
    pub duration_ms: Option<u64>,

    #[serde(default = "default_true")]
    pub supports_seek_to: bool,

    #[serde(default = "default_true")]
    pub supports_fast_forward: bool,

    #[serde(default = "default_true")]
    pub supports_rewind: bool,

    /// Report no playback state at all
    #[serde(default)]
    pub no_state: bool,
}

fn default_initial_volume() -> u32 {
    7
}

fn default_max_volume() -> u32 {
    15
}

fn default_headset() -> bool {
    true
}

fn default_speed() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}
