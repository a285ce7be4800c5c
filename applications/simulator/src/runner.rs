/// Trace replay
use crate::host::{LogDebugSurface, SimClock, SimPlayer, SimRoute, SimStream};
use crate::trace::{SessionSpec, Step, TimingInput, Trace};
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};
use trackskip_core::{
    InputDeviceInfo, KeyAction, KeyCode, KeyEvent, MediaEndpoint, SeekError, Timestamp,
    VolumeSample,
};
use trackskip_engine::{
    ActiveSessions, Collaborators, KeyOutcome, SeekEngine, SeekMethod, SeekReport, VolumeOutcome,
};
use trackskip_settings::SettingsStore;

/// Summary printed after a replay
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub keys_consumed: usize,
    pub keys_passed: usize,
    pub seeks: Vec<SeekEntry>,
    pub failures: Vec<FailureEntry>,
    pub rejected_settings: Vec<String>,
    pub final_volume: u32,
    pub baseline: Option<u32>,
    pub acknowledgements: Vec<String>,
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Serialize)]
pub struct SeekEntry {
    pub at_ms: u64,
    pub trigger: &'static str,
    pub endpoint: String,
    pub method: &'static str,
    pub target_ms: u64,
    pub restored_to: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FailureEntry {
    pub at_ms: u64,
    pub error: String,
    /// Nothing to seek; no endpoint was contacted
    pub no_media: bool,
}

#[derive(Debug, Serialize)]
pub struct PlayerEntry {
    pub name: String,
    pub commands: Vec<String>,
}

fn method_name(method: SeekMethod) -> &'static str {
    match method {
        SeekMethod::SeekTo => "seek_to",
        SeekMethod::FastForward => "fast_forward",
        SeekMethod::Rewind => "rewind",
    }
}

/// One replay of a trace against a fresh engine
pub struct Simulation {
    clock: SimClock,
    route: Arc<SimRoute>,
    stream: Arc<SimStream>,
    sessions: Arc<ActiveSessions>,
    debug: Arc<LogDebugSurface>,
    settings: SettingsStore,
    players: Vec<Arc<SimPlayer>>,
    engine: SeekEngine,
    report: RunReport,
}

impl Simulation {
    pub fn new(trace: &Trace, settings: SettingsStore) -> Self {
        let clock = SimClock::default();
        let route = Arc::new(SimRoute::new(trace.headset));
        let stream = Arc::new(SimStream::new(trace.initial_volume, trace.max_volume));
        let sessions = Arc::new(ActiveSessions::new());
        let debug = Arc::new(LogDebugSurface::default());

        let mut engine = SeekEngine::new(Collaborators {
            settings: Arc::new(settings.clone()),
            route: route.clone(),
            volume_sink: stream.clone(),
            registry: sessions.clone(),
            debug: debug.clone(),
        });
        engine.prime_volume(stream.level());

        let mut simulation = Self {
            clock,
            route,
            stream,
            sessions,
            debug,
            settings,
            players: Vec::new(),
            engine,
            report: RunReport::default(),
        };

        let initial = simulation.spawn_players(&trace.sessions);
        simulation.sessions.start_listening(initial);
        simulation
    }

    /// Replay every step and return the report
    ///
    /// # Errors
    /// Returns an error if step timestamps go backwards
    pub fn run(mut self, steps: &[Step]) -> Result<RunReport> {
        let mut last = Timestamp::ZERO;

        for (index, step) in steps.iter().enumerate() {
            if let Some(at) = step.at() {
                let at = Timestamp::from_millis(at);
                if at < last {
                    bail!("step {index} at {at} is earlier than the previous step at {last}");
                }
                last = at;
                self.clock.set(at.as_millis());
            }
            self.apply(step);
        }

        self.sessions.stop_listening();

        let mut report = self.report;
        report.final_volume = self.stream.level();
        report.baseline = self.engine.baseline();
        report.acknowledgements = self.debug.shown();
        report.players = self
            .players
            .iter()
            .map(|player| PlayerEntry {
                name: player.name().to_string(),
                commands: player.commands(),
            })
            .collect();
        Ok(report)
    }

    fn apply(&mut self, step: &Step) {
        match step {
            Step::Key {
                at,
                code,
                external,
                device,
                action,
                repeat,
            } => {
                let is_from_external_device = match device {
                    Some(device) => InputDeviceInfo::is_external_hid(Some(device)),
                    None => *external,
                };
                let event = KeyEvent {
                    code: *code,
                    action: *action,
                    is_repeat: *repeat,
                    is_from_external_device,
                    timestamp: Timestamp::from_millis(*at),
                };
                self.key(event);
            }
            Step::Volume { at, level } => {
                let level = self.stream.set_external(*level);
                self.feed_volume(level, Timestamp::from_millis(*at));
            }
            Step::Headset { connected } => {
                info!(connected, "Headset route changed");
                self.route.set(*connected);
            }
            Step::Sessions { sessions } => {
                let players = self.spawn_players(sessions);
                info!(count = players.len(), "Active sessions changed");
                self.sessions.on_sessions_changed(Some(players));
            }
            Step::Settings {
                enabled,
                debug,
                cycle_mode,
                timing,
            } => self.edit_settings(*enabled, *debug, *cycle_mode, timing.as_ref()),
        }
    }

    fn edit_settings(
        &mut self,
        enabled: Option<bool>,
        debug: Option<bool>,
        cycle_mode: bool,
        timing: Option<&TimingInput>,
    ) {
        if let Some(enabled) = enabled {
            self.settings.set_enabled(enabled);
        }
        if let Some(debug) = debug {
            self.settings.set_debug(debug);
        }
        if cycle_mode {
            let mode = self.settings.cycle_mode();
            info!(%mode, "Trigger mode changed");
        }
        if let Some(input) = timing {
            if let Err(e) = self.settings.apply_timing_input(input.field, &input.value) {
                self.report.rejected_settings.push(e.to_string());
            }
        }
    }

    fn key(&mut self, event: KeyEvent) {
        let at = event.timestamp;
        match self.engine.on_key_event(event) {
            KeyOutcome::Seeked(report) => {
                self.report.keys_consumed += 1;
                self.record_seek(at, "key", &report, None);
            }
            outcome => {
                self.report.keys_passed += 1;
                if let KeyOutcome::SeekFailed(error) = &outcome {
                    self.record_failure(at, error);
                }
                debug!(?outcome, "Key left to the host");

                // Default handling of an unconsumed volume key moves the stream one step
                if event.action == KeyAction::Down {
                    let up = match event.code {
                        KeyCode::VolumeUp => Some(true),
                        KeyCode::VolumeDown => Some(false),
                        _ => None,
                    };
                    if let Some(up) = up {
                        let level = self.stream.step(up);
                        self.feed_volume(level, at);
                    }
                }
            }
        }
    }

    /// Deliver a volume change, then every echo of the engine's own writes
    fn feed_volume(&mut self, level: u32, at: Timestamp) {
        let mut queue = VecDeque::from([level]);

        while let Some(level) = queue.pop_front() {
            let outcome = self.engine.on_volume_sample(VolumeSample::new(level, at));
            debug!(level, ?outcome, "Volume sample handled");

            match outcome {
                VolumeOutcome::Seeked {
                    report,
                    restored_to,
                } => self.record_seek(at, "volume", &report, Some(restored_to)),
                VolumeOutcome::RestoreFailed { report, error } => {
                    self.record_seek(at, "volume", &report, None);
                    self.record_failure(at, &error);
                }
                VolumeOutcome::SeekFailed(error) => self.record_failure(at, &error),
                VolumeOutcome::NotObserved
                | VolumeOutcome::Classified(_)
                | VolumeOutcome::NoEndpoint => {}
            }

            queue.extend(self.stream.take_echoes());
        }
    }

    fn spawn_players(&mut self, specs: &[SessionSpec]) -> Vec<Arc<dyn MediaEndpoint>> {
        specs
            .iter()
            .map(|spec| {
                let player = Arc::new(SimPlayer::from_spec(spec, self.clock.clone()));
                self.players.push(player.clone());
                player as Arc<dyn MediaEndpoint>
            })
            .collect()
    }

    fn record_seek(
        &mut self,
        at: Timestamp,
        trigger: &'static str,
        report: &SeekReport,
        restored_to: Option<u32>,
    ) {
        info!(
            at = %at,
            trigger,
            endpoint = %report.endpoint,
            target = ?report.target,
            "Seek"
        );
        self.report.seeks.push(SeekEntry {
            at_ms: at.as_millis(),
            trigger,
            endpoint: report.endpoint.clone(),
            method: method_name(report.method),
            target_ms: u64::try_from(report.target.as_millis()).unwrap_or(u64::MAX),
            restored_to,
        });
    }

    fn record_failure(&mut self, at: Timestamp, error: &SeekError) {
        self.report.failures.push(FailureEntry {
            at_ms: at.as_millis(),
            error: error.to_string(),
            no_media: error.is_selection_failure(),
        });
    }
}

/// Parse a trace and replay it
///
/// # Errors
/// Returns an error if the trace is malformed or its timestamps go backwards
pub fn replay(trace_json: &str, settings: SettingsStore) -> Result<RunReport> {
    let trace: Trace = serde_json::from_str(trace_json)?;
    Simulation::new(&trace, settings).run(&trace.steps)
}
