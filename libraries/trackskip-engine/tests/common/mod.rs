//! Shared test doubles for engine integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trackskip_core::{
    AudioRoute, DebugSurface, EngineSettings, MediaEndpoint, PlaybackSnapshot, PlaybackStatus,
    Result, SeekError, SeekTriggerMode, SettingsProvider, Timestamp, VolumeSink,
};
use trackskip_engine::{ActiveSessions, Collaborators, SeekEngine};

// ===== Settings =====

pub struct MockSettings(Mutex<EngineSettings>);

impl MockSettings {
    pub fn new(settings: EngineSettings) -> Self {
        Self(Mutex::new(settings))
    }

    pub fn update(&self, f: impl FnOnce(&mut EngineSettings)) {
        f(&mut self.0.lock().unwrap());
    }
}

impl SettingsProvider for MockSettings {
    fn current(&self) -> EngineSettings {
        *self.0.lock().unwrap()
    }
}

// ===== Audio route =====

pub struct MockRoute(AtomicBool);

impl MockRoute {
    pub fn set(&self, headset: bool) {
        self.0.store(headset, Ordering::SeqCst);
    }
}

impl AudioRoute for MockRoute {
    fn is_headset_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ===== Volume sink =====

#[derive(Default)]
pub struct RecordingSink {
    pub writes: Mutex<Vec<u32>>,
    pub fail: AtomicBool,
}

impl RecordingSink {
    pub fn writes(&self) -> Vec<u32> {
        self.writes.lock().unwrap().clone()
    }
}

impl VolumeSink for RecordingSink {
    fn set_level(&self, level: u32) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SeekError::host("volume is fixed"));
        }
        self.writes.lock().unwrap().push(level);
        Ok(())
    }
}

// ===== Debug surface =====

#[derive(Default)]
pub struct RecordingDebug(pub Mutex<Vec<String>>);

impl RecordingDebug {
    pub fn labels(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl DebugSurface for RecordingDebug {
    fn acknowledge(&self, label: &str) {
        self.0.lock().unwrap().push(label.to_string());
    }
}

// ===== Media endpoint =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SeekTo(Duration),
    FastForward,
    Rewind,
}

pub struct ScriptedEndpoint {
    pub name: String,
    pub snapshot: Mutex<Option<PlaybackSnapshot>>,
    pub seek_ok: AtomicBool,
    pub transport_ok: AtomicBool,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedEndpoint {
    pub fn new(name: &str, snapshot: Option<PlaybackSnapshot>) -> Self {
        Self {
            name: name.to_string(),
            snapshot: Mutex::new(snapshot),
            seek_ok: AtomicBool::new(true),
            transport_ok: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Paused at `position_ms`, seekable, 10 minute track
    pub fn paused_at(name: &str, position_ms: u64) -> Self {
        Self::new(
            name,
            Some(PlaybackSnapshot {
                position: Duration::from_millis(position_ms),
                last_update: Some(Timestamp::from_millis(1)),
                speed: 1.0,
                status: PlaybackStatus::Paused,
                duration: Some(Duration::from_secs(600)),
                supports_seek_to: true,
                supports_fast_forward: true,
                supports_rewind: true,
            }),
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, ok: &AtomicBool) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if ok.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SeekError::host("not supported"))
        }
    }
}

impl MediaEndpoint for ScriptedEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> Option<PlaybackSnapshot> {
        *self.snapshot.lock().unwrap()
    }

    fn seek_to(&self, position: Duration) -> Result<()> {
        self.record(Call::SeekTo(position), &self.seek_ok)
    }

    fn fast_forward(&self) -> Result<()> {
        self.record(Call::FastForward, &self.transport_ok)
    }

    fn rewind(&self) -> Result<()> {
        self.record(Call::Rewind, &self.transport_ok)
    }
}

// ===== Harness =====

pub struct Harness {
    pub settings: Arc<MockSettings>,
    pub route: Arc<MockRoute>,
    pub sink: Arc<RecordingSink>,
    pub sessions: Arc<ActiveSessions>,
    pub debug: Arc<RecordingDebug>,
    pub engine: SeekEngine,
}

impl Harness {
    pub fn new(mode: SeekTriggerMode) -> Self {
        let settings = Arc::new(MockSettings::new(EngineSettings {
            mode,
            ..Default::default()
        }));
        let route = Arc::new(MockRoute(AtomicBool::new(true)));
        let sink = Arc::new(RecordingSink::default());
        let sessions = Arc::new(ActiveSessions::new());
        sessions.start_listening(Vec::new());
        let debug = Arc::new(RecordingDebug::default());

        let engine = SeekEngine::new(Collaborators {
            settings: settings.clone(),
            route: route.clone(),
            volume_sink: sink.clone(),
            registry: sessions.clone(),
            debug: debug.clone(),
        });

        Self {
            settings,
            route,
            sink,
            sessions,
            debug,
            engine,
        }
    }

    /// Register endpoints and hand back typed handles to them
    pub fn with_endpoints(&self, endpoints: Vec<Arc<ScriptedEndpoint>>) -> Vec<Arc<ScriptedEndpoint>> {
        let dynamic: Vec<Arc<dyn MediaEndpoint>> = endpoints
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn MediaEndpoint>)
            .collect();
        self.sessions.on_sessions_changed(Some(dynamic));
        endpoints
    }

    pub fn with_player(&self, position_ms: u64) -> Arc<ScriptedEndpoint> {
        let player = Arc::new(ScriptedEndpoint::paused_at("player", position_ms));
        self.with_endpoints(vec![player.clone()]);
        player
    }
}

pub fn at(ms: u64) -> Timestamp {
    Timestamp::from_millis(ms)
}
