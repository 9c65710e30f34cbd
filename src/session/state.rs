use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::posture::{
    compute_score, EngineConfig, PostureStatus, PressureReading, PressureSimulator,
    ScoreBreakdown,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const BREAK_TAKEN_BONUS: u8 = 10;
const SCORE_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Running,
    Paused,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Running
    }
}

impl SessionStatus {
    pub fn toggled(self) -> Self {
        match self {
            SessionStatus::Running => SessionStatus::Paused,
            SessionStatus::Paused => SessionStatus::Running,
        }
    }
}

/// Live posture values for the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostureState {
    pub score: u8,
    pub status: PostureStatus,
    pub pressure: PressureReading,
    pub tilt_angle: f64,
    /// Simulated minutes since the last reset.
    pub session_time: f64,
    pub breaks_suggested: u32,
    pub alerts_triggered: u32,
}

impl Default for PostureState {
    fn default() -> Self {
        Self {
            score: 85,
            status: PostureStatus::Good,
            pressure: PressureReading::default(),
            tilt_angle: 2.0,
            session_time: 0.0,
            breaks_suggested: 0,
            alerts_triggered: 0,
        }
    }
}

impl PostureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the session counters. Score, status and pressure are kept.
    pub fn reset(&mut self) {
        self.session_time = 0.0;
        self.breaks_suggested = 0;
        self.alerts_triggered = 0;
    }

    /// Transient corrective override; the next tick re-derives score and
    /// status from the pressure reading.
    pub fn record_break_taken(&mut self) {
        self.score = self.score.saturating_add(BREAK_TAKEN_BONUS).min(SCORE_MAX);
        self.status = PostureStatus::Good;
    }
}

/// Alerts fire only when leaving `Good`, not while staying out of it.
pub fn is_alert_edge(previous: PostureStatus, next: PostureStatus) -> bool {
    previous.is_good() && !next.is_good()
}

/// Result of one applied tick, used by callers to react to edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub breakdown: ScoreBreakdown,
    pub alert_raised: bool,
    pub break_suggested: bool,
}

/// The session state machine: owns the posture state, the random source and
/// the running/paused flag. All mutation goes through its methods.
pub struct PostureSession {
    id: String,
    config: EngineConfig,
    simulator: PressureSimulator,
    status: SessionStatus,
    state: PostureState,
    last_breakdown: Option<ScoreBreakdown>,
    ticks: u64,
    /// Whole ticks since the last reset; drives the clock and break cadence.
    ticks_since_reset: u64,
}

impl PostureSession {
    pub fn new(config: EngineConfig, simulator: PressureSimulator) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            config,
            simulator,
            status: SessionStatus::Running,
            state: PostureState::new(),
            last_breakdown: None,
            ticks: 0,
            ticks_since_reset: 0,
        }
    }

    pub fn with_state(mut self, state: PostureState) -> Self {
        self.ticks_since_reset = self.config.cadence.ticks_for(state.session_time);
        self.state = state;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn state(&self) -> &PostureState {
        &self.state
    }

    pub fn last_breakdown(&self) -> Option<&ScoreBreakdown> {
        self.last_breakdown.as_ref()
    }

    /// Number of ticks applied since the session was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn toggle(&mut self) -> SessionStatus {
        self.status = self.status.toggled();
        log_info!("session {} is now {:?}", self.id, self.status);
        self.status
    }

    pub fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    /// Runs one simulation step. Does nothing while paused.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }
        let pressure = self.simulator.next_reading(&self.state.pressure);
        let tilt_angle = self.simulator.next_tilt(self.state.tilt_angle);
        Some(self.apply_reading(pressure, tilt_angle))
    }

    /// Scores `pressure` and advances the clock and edge-triggered counters.
    pub fn apply_reading(&mut self, pressure: PressureReading, tilt_angle: f64) -> TickOutcome {
        let pressure = pressure.clamped();
        let breakdown = compute_score(&pressure, &self.config);
        let previous_status = self.state.status;

        let cadence = &self.config.cadence;
        let ticks_since_reset = self.ticks_since_reset + 1;
        let session_time = cadence.minutes_for(ticks_since_reset);
        let break_suggested = ticks_since_reset % cadence.ticks_per_break() == 0;
        let alert_raised = is_alert_edge(previous_status, breakdown.status);

        let state = &mut self.state;
        state.pressure = pressure;
        state.tilt_angle = tilt_angle;
        state.score = breakdown.total;
        state.status = breakdown.status;
        state.session_time = session_time;
        if break_suggested {
            state.breaks_suggested += 1;
            log_info!(
                "session {}: break suggested at {:.1} min ({} so far)",
                self.id,
                session_time,
                state.breaks_suggested
            );
        }
        if alert_raised {
            state.alerts_triggered += 1;
            log_warn!(
                "session {}: posture {:?} (score {}), alert #{}",
                self.id,
                breakdown.status,
                breakdown.total,
                state.alerts_triggered
            );
        }

        self.last_breakdown = Some(breakdown);
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks_since_reset = ticks_since_reset;

        TickOutcome {
            breakdown,
            alert_raised,
            break_suggested,
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.ticks_since_reset = 0;
        log_info!("session {} counters reset", self.id);
    }

    pub fn record_break_taken(&mut self) {
        self.state.record_break_taken();
        log_info!(
            "session {}: break taken, score now {}",
            self.id,
            self.state.score
        );
    }
}

/// Formats simulated minutes as `HH:MM:SS`.
pub fn format_session_time(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).floor() as u64;
    let secs = ((minutes % 1.0) * 60.0).floor() as u64;
    format!("{hours:02}:{mins:02}:{secs:02}")
}
