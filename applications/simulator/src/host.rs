/// In-memory host for trace replay
///
/// Stands in for the platform: a headset route flag, a media stream with a
/// volume index, a set of players, and a debug surface that logs.
use crate::trace::SessionSpec;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trackskip_core::{
    AudioRoute, DebugSurface, MediaEndpoint, PlaybackSnapshot, Result, SeekError, Timestamp,
    VolumeSink,
};

/// Replay clock shared by the host pieces
#[derive(Debug, Clone, Default)]
pub struct SimClock(Arc<AtomicU64>);

impl SimClock {
    pub fn set(&self, millis: u64) {
        self.0.store(millis, Ordering::SeqCst);
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.0.load(Ordering::SeqCst))
    }
}

#[derive(Debug)]
pub struct SimRoute(AtomicBool);

impl SimRoute {
    pub fn new(headset: bool) -> Self {
        Self(AtomicBool::new(headset))
    }

    pub fn set(&self, headset: bool) {
        self.0.store(headset, Ordering::SeqCst);
    }
}

impl AudioRoute for SimRoute {
    fn is_headset_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Media stream volume
///
/// Engine writes land in `pending_echoes`; the platform reports every write
/// back as a volume change, so the runner feeds them to the engine again.
#[derive(Debug)]
pub struct SimStream {
    level: AtomicU32,
    max: u32,
    pending_echoes: Mutex<Vec<u32>>,
}

impl SimStream {
    pub fn new(level: u32, max: u32) -> Self {
        Self {
            level: AtomicU32::new(level.min(max)),
            max,
            pending_echoes: Mutex::new(Vec::new()),
        }
    }

    pub fn level(&self) -> u32 {
        self.level.load(Ordering::SeqCst)
    }

    /// Platform-side volume change; returns the resulting level
    pub fn set_external(&self, level: u32) -> u32 {
        let level = level.min(self.max);
        self.level.store(level, Ordering::SeqCst);
        level
    }

    /// One step up or down, as a phone key would do
    pub fn step(&self, up: bool) -> u32 {
        let current = self.level();
        let next = if up {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        self.set_external(next)
    }

    pub fn take_echoes(&self) -> Vec<u32> {
        match self.pending_echoes.lock() {
            Ok(mut echoes) => std::mem::take(&mut *echoes),
            Err(_) => Vec::new(),
        }
    }
}

impl VolumeSink for SimStream {
    fn set_level(&self, level: u32) -> Result<()> {
        if level > self.max {
            return Err(SeekError::host(format!(
                "volume {level} above stream maximum {}",
                self.max
            )));
        }

        self.level.store(level, Ordering::SeqCst);
        self.pending_echoes
            .lock()
            .map_err(|_| SeekError::host("volume stream lock poisoned"))?
            .push(level);
        Ok(())
    }
}

/// A player session
pub struct SimPlayer {
    name: String,
    clock: SimClock,
    state: Mutex<Option<PlaybackSnapshot>>,
    commands: Mutex<Vec<String>>,
}

impl SimPlayer {
    pub fn from_spec(spec: &SessionSpec, clock: SimClock) -> Self {
        let snapshot = (!spec.no_state).then(|| PlaybackSnapshot {
            position: Duration::from_millis(spec.position_ms),
            last_update: Some(Timestamp::from_millis(spec.updated_at)),
            speed: spec.speed,
            status: spec.status,
            duration: spec.duration_ms.map(Duration::from_millis),
            supports_seek_to: spec.supports_seek_to,
            supports_fast_forward: spec.supports_fast_forward,
            supports_rewind: spec.supports_rewind,
        });

        Self {
            name: spec.name.clone(),
            clock,
            state: Mutex::new(snapshot),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Commands received so far, e.g. `seek_to 40000ms`
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    fn record(&self, command: String) -> Result<()> {
        self.commands
            .lock()
            .map_err(|_| SeekError::host("player command log poisoned"))?
            .push(command);
        Ok(())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut PlaybackSnapshot) -> Result<R>) -> Result<R> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SeekError::host("player state poisoned"))?;
        let snapshot = state.as_mut().ok_or(SeekError::NoPlaybackState)?;
        f(snapshot)
    }
}

impl MediaEndpoint for SimPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> Option<PlaybackSnapshot> {
        self.state.lock().ok().and_then(|state| *state)
    }

    fn seek_to(&self, position: Duration) -> Result<()> {
        let now = self.clock.now();
        self.with_state(|snapshot| {
            if !snapshot.supports_seek_to {
                return Err(SeekError::host("seek_to not supported"));
            }
            snapshot.position = position;
            snapshot.last_update = Some(now);
            Ok(())
        })?;
        self.record(format!("seek_to {}ms", position.as_millis()))
    }

    fn fast_forward(&self) -> Result<()> {
        self.with_state(|snapshot| {
            if snapshot.supports_fast_forward {
                Ok(())
            } else {
                Err(SeekError::host("fast_forward not supported"))
            }
        })?;
        self.record("fast_forward".to_string())
    }

    fn rewind(&self) -> Result<()> {
        self.with_state(|snapshot| {
            if snapshot.supports_rewind {
                Ok(())
            } else {
                Err(SeekError::host("rewind not supported"))
            }
        })?;
        self.record("rewind".to_string())
    }
}

/// Logs acknowledgements instead of showing a toast
#[derive(Debug, Default)]
pub struct LogDebugSurface {
    shown: Mutex<Vec<String>>,
}

impl LogDebugSurface {
    pub fn shown(&self) -> Vec<String> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }
}

impl DebugSurface for LogDebugSurface {
    fn acknowledge(&self, label: &str) {
        tracing::info!(label, "Seek acknowledged");
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(label.to_string());
        }
    }
}
