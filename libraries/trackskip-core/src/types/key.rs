//! Key events and seek directions

use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Seek (and volume change) direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Forward / volume up
    Up,
    /// Backward / volume down
    Down,
}

impl Direction {
    /// Direction of a level change, `None` when nothing changed
    pub fn of_change(from: u32, to: u32) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// +1 for `Up`, -1 for `Down`
    pub fn sign(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// Key codes the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyCode {
    Next,
    Previous,
    FastForward,
    Rewind,
    VolumeUp,
    VolumeDown,
    /// Any other key, passed through untouched
    Other(i32),
}

impl KeyCode {
    /// Direction implied by a media transport key
    pub fn media_direction(self) -> Option<Direction> {
        match self {
            KeyCode::Next | KeyCode::FastForward => Some(Direction::Up),
            KeyCode::Previous | KeyCode::Rewind => Some(Direction::Down),
            _ => None,
        }
    }

    /// Direction of a volume key
    pub fn volume_direction(self) -> Option<Direction> {
        match self {
            KeyCode::VolumeUp => Some(Direction::Up),
            KeyCode::VolumeDown => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Key action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    #[default]
    Down,
    Up,
}

/// A single key event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,

    #[serde(default)]
    pub action: KeyAction,

    /// Auto-repeat of a held key
    #[serde(default)]
    pub is_repeat: bool,

    /// Produced by a separate physical peripheral (headset, remote)
    /// rather than the phone's own buttons
    #[serde(default)]
    pub is_from_external_device: bool,

    pub timestamp: Timestamp,
}

impl KeyEvent {
    /// A first key-down event
    pub fn down(code: KeyCode, is_from_external_device: bool, timestamp: Timestamp) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            is_repeat: false,
            is_from_external_device,
            timestamp,
        }
    }

    /// Whether this is an initial press (not a release, not auto-repeat)
    pub fn is_initial_press(&self) -> bool {
        self.action == KeyAction::Down && !self.is_repeat
    }
}

/// What the host knows about the input device behind a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDeviceInfo {
    /// The virtual (software) keyboard
    pub is_virtual: bool,
    /// Physically separate from the phone
    pub is_external: bool,
    pub has_button_source: bool,
    pub has_keyboard_source: bool,
    pub has_gamepad_source: bool,
}

impl InputDeviceInfo {
    /// Binary "external HID-like device" classification
    ///
    /// Unknown and virtual devices are never external. An external device
    /// must also expose a button-like input source.
    pub fn is_external_hid(device: Option<&Self>) -> bool {
        let Some(device) = device else {
            return false;
        };
        if device.is_virtual || !device.is_external {
            return false;
        }
        device.has_button_source || device.has_keyboard_source || device.has_gamepad_source
    }
}
