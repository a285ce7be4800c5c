//! Seek engine - core orchestration
//!
//! Binds the dispatcher, correlator, classifier, restorer and executor to
//! one host. Every entry point runs to completion on the caller's thread:
//! windows are evaluated against the signal's timestamp, nothing is
//! scheduled, and every collaborator failure degrades to "not consumed".

use crate::{
    classifier::{VolumeClassifier, VolumeVerdict},
    correlator::{PhoneKeyCorrelator, PhoneKeyMark},
    dispatcher::{admits_volume, route_key, KeyRoute, PassReason},
    double_press::PendingPress,
    executor::{SeekDecision, SeekExecutor, SeekReport},
    restorer::BaselineRestorer,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use trackskip_core::{
    AudioRoute, DebugSurface, Direction, EndpointRegistry, EngineSettings, KeyEvent, SeekError,
    SettingsProvider, Timestamp, VolumeSample, VolumeSink,
};

/// Handles to the host, supplied once at construction
#[derive(Clone)]
pub struct Collaborators {
    pub settings: Arc<dyn SettingsProvider>,
    pub route: Arc<dyn AudioRoute>,
    pub volume_sink: Arc<dyn VolumeSink>,
    pub registry: Arc<dyn EndpointRegistry>,
    pub debug: Arc<dyn DebugSurface>,
}

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Left to the host
    Passed(PassReason),

    /// Phone volume key recorded; left to the host
    PhoneKeyMarked(Direction),

    /// Seek issued; the host must not handle the key
    Seeked(SeekReport),

    /// Seek attempted but failed; left to the host
    SeekFailed(SeekError),
}

impl KeyOutcome {
    /// Whether the host's default handling must be suppressed
    pub fn consumed(&self) -> bool {
        matches!(self, KeyOutcome::Seeked(_))
    }
}

/// Result of handling a volume sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeOutcome {
    /// Disabled, no headset, or a mode that ignores volume samples
    NotObserved,

    /// Classified without issuing a seek
    Classified(VolumeVerdict),

    /// No endpoint to seek; the change stands
    NoEndpoint,

    /// Seek issued and the pre-gesture level written back
    Seeked {
        report: SeekReport,
        restored_to: u32,
    },

    /// Seek issued but the restoring write failed; the change stands
    RestoreFailed { report: SeekReport, error: SeekError },

    /// Seek failed; the change stands
    SeekFailed(SeekError),
}

/// The seek-trigger engine for one host session
pub struct SeekEngine {
    settings: Arc<dyn SettingsProvider>,
    route: Arc<dyn AudioRoute>,
    debug: Arc<dyn DebugSurface>,
    executor: SeekExecutor,
    restorer: BaselineRestorer,
    phone_keys: PhoneKeyCorrelator,
    classifier: VolumeClassifier,
}

impl SeekEngine {
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            settings,
            route,
            volume_sink,
            registry,
            debug,
        } = collaborators;

        Self {
            settings,
            route,
            debug,
            executor: SeekExecutor::new(registry),
            restorer: BaselineRestorer::new(volume_sink),
            phone_keys: PhoneKeyCorrelator::new(),
            classifier: VolumeClassifier::new(),
        }
    }

    /// Seed the volume baseline with the level read at startup
    pub fn prime_volume(&mut self, level: u32) {
        self.classifier.set_baseline(level);
    }

    /// Handle a key event
    pub fn on_key_event(&mut self, event: KeyEvent) -> KeyOutcome {
        let settings = self.settings.current();
        let headset = self.route.is_headset_active();

        match route_key(&event, &settings, headset) {
            KeyRoute::PassThrough(reason) => {
                debug!(code = ?event.code, ?reason, "Key passed through");
                KeyOutcome::Passed(reason)
            }
            KeyRoute::MarkPhoneKey(direction) => {
                self.phone_keys.mark(direction, event.timestamp);
                debug!(?direction, at = %event.timestamp, "Phone volume key marked");
                KeyOutcome::PhoneKeyMarked(direction)
            }
            KeyRoute::Seek(direction) => {
                let decision = SeekDecision::new(direction, settings.timings.seek_step);
                match self.seek(decision, event.timestamp, &settings) {
                    Ok(report) => KeyOutcome::Seeked(report),
                    Err(e) => KeyOutcome::SeekFailed(e),
                }
            }
        }
    }

    /// Handle a volume level sample
    pub fn on_volume_sample(&mut self, sample: VolumeSample) -> VolumeOutcome {
        let settings = self.settings.current();
        if !admits_volume(&settings, self.route.is_headset_active()) {
            return VolumeOutcome::NotObserved;
        }

        let verdict = self.classifier.observe(
            sample,
            settings.mode,
            &settings.timings,
            &self.phone_keys,
        );

        let VolumeVerdict::Seek {
            direction,
            restore_to,
            level,
        } = verdict
        else {
            return VolumeOutcome::Classified(verdict);
        };

        if !self.executor.has_seekable_endpoint() {
            warn!(level, "Volume gesture with no media endpoint; accepting change");
            self.classifier.accept(level);
            return VolumeOutcome::NoEndpoint;
        }

        let decision = SeekDecision::new(direction, settings.timings.seek_step);
        let report = match self.seek(decision, sample.timestamp, &settings) {
            Ok(report) => report,
            Err(e) => {
                self.classifier.accept(level);
                return VolumeOutcome::SeekFailed(e);
            }
        };

        match self.restorer.restore(
            &mut self.classifier,
            restore_to,
            settings.timings.post_restore_suppress_window,
            sample.timestamp,
        ) {
            Ok(()) => VolumeOutcome::Seeked {
                report,
                restored_to: restore_to,
            },
            Err(error) => {
                self.classifier.accept(level);
                VolumeOutcome::RestoreFailed { report, error }
            }
        }
    }

    fn seek(
        &self,
        decision: SeekDecision,
        now: Timestamp,
        settings: &EngineSettings,
    ) -> trackskip_core::Result<SeekReport> {
        match self.executor.seek_by(decision, now) {
            Ok(report) => {
                if settings.debug {
                    self.debug.acknowledge(&decision.label());
                }
                Ok(report)
            }
            Err(e) => {
                warn!(direction = ?decision.direction, "Seek failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn baseline(&self) -> Option<u32> {
        self.classifier.baseline()
    }

    pub fn pending(&self) -> Option<&PendingPress<u32>> {
        self.classifier.pending()
    }

    pub fn suppressed_until(&self) -> Option<Timestamp> {
        self.classifier.suppressed_until()
    }

    pub fn phone_key_mark(&self) -> Option<PhoneKeyMark> {
        self.phone_keys.last_mark()
    }
}

/// A `SeekEngine` behind one lock, for hosts that deliver key events and
/// volume samples on different threads
#[derive(Clone)]
pub struct SharedSeekEngine {
    inner: Arc<Mutex<SeekEngine>>,
}

impl SharedSeekEngine {
    pub fn new(engine: SeekEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Returns whether the host must suppress its default handling
    pub fn on_key_event(&self, event: KeyEvent) -> bool {
        match self.inner.lock() {
            Ok(mut engine) => engine.on_key_event(event).consumed(),
            Err(_) => {
                warn!("Engine lock poisoned; key event passed through");
                false
            }
        }
    }

    pub fn on_volume_sample(&self, sample: VolumeSample) -> Option<VolumeOutcome> {
        match self.inner.lock() {
            Ok(mut engine) => Some(engine.on_volume_sample(sample)),
            Err(_) => {
                warn!("Engine lock poisoned; volume sample dropped");
                None
            }
        }
    }

    pub fn prime_volume(&self, level: u32) {
        if let Ok(mut engine) = self.inner.lock() {
            engine.prime_volume(level);
        }
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut SeekEngine) -> R) -> Option<R> {
        self.inner.lock().ok().map(|mut engine| f(&mut engine))
    }
}
