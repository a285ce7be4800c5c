//! Mode dispatch
//!
//! Stateless routing policy. Decides, for each key event, whether the
//! engine should try to seek, remember a phone key press, or leave the
//! event to the host; and whether volume samples are classified at all.

use trackskip_core::{Direction, EngineSettings, KeyEvent, SeekTriggerMode};

/// Why an event was left to the host untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// Master switch is off
    Disabled,
    /// Key release or auto-repeat
    NotInitialPress,
    /// Volume key while no headset-class output is routed
    NoHeadset,
    /// Not a media or volume key
    UnhandledKey,
    /// External volume key in a mode that reads volume samples instead
    ObservedByVolumePath,
}

/// What to do with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// Do nothing; the host handles the key
    PassThrough(PassReason),

    /// Seek now and consume the event if the seek succeeds
    Seek(Direction),

    /// A phone volume key: record it for the volume path, never consume
    MarkPhoneKey(Direction),
}

/// Route a key event
pub fn route_key(event: &KeyEvent, settings: &EngineSettings, headset_active: bool) -> KeyRoute {
    if !settings.enabled {
        return KeyRoute::PassThrough(PassReason::Disabled);
    }
    if !event.is_initial_press() {
        return KeyRoute::PassThrough(PassReason::NotInitialPress);
    }

    if let Some(direction) = event.code.media_direction() {
        return KeyRoute::Seek(direction);
    }

    let Some(direction) = event.code.volume_direction() else {
        return KeyRoute::PassThrough(PassReason::UnhandledKey);
    };

    if !headset_active {
        return KeyRoute::PassThrough(PassReason::NoHeadset);
    }

    // Phone keys are marked in every mode so a runtime mode switch finds
    // the correlator already primed.
    if !event.is_from_external_device {
        return KeyRoute::MarkPhoneKey(direction);
    }

    match settings.mode {
        SeekTriggerMode::SinglePressHeadset => KeyRoute::Seek(direction),
        SeekTriggerMode::DoublePressVolume | SeekTriggerMode::SinglePressAnyVolume => {
            KeyRoute::PassThrough(PassReason::ObservedByVolumePath)
        }
    }
}

/// Whether volume samples should be classified right now
pub fn admits_volume(settings: &EngineSettings, headset_active: bool) -> bool {
    settings.enabled && headset_active && settings.mode.observes_volume()
}
