use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::posture::{EngineConfig, PressureLevels, PressureSimulator, ScoreBreakdown};

use super::breaks::{advise, BreakAdvice};
use super::scheduler::Ticker;
use super::state::{format_session_time, PostureSession, PostureState, SessionStatus};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Everything the display layer needs after a tick or a user action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub status: SessionStatus,
    pub state: PostureState,
    pub breakdown: Option<ScoreBreakdown>,
    pub pressure_levels: PressureLevels,
    pub clock: String,
    pub break_advice: BreakAdvice,
    pub ticks: u64,
}

impl SessionSnapshot {
    pub fn capture(session: &PostureSession) -> Self {
        let state = session.state().clone();
        Self {
            session_id: session.id().to_string(),
            status: session.status(),
            breakdown: session.last_breakdown().copied(),
            pressure_levels: state.pressure.levels(),
            clock: format_session_time(state.session_time),
            break_advice: advise(state.session_time, state.status),
            ticks: session.ticks(),
            state,
        }
    }
}

/// Async owner of the posture session and its tick source.
///
/// Lock order is ticker, then session. The ticker task only ever takes the
/// session lock.
#[derive(Clone)]
pub struct SessionController {
    session: Arc<Mutex<PostureSession>>,
    ticker: Arc<Mutex<Option<Ticker>>>,
    tick_interval: Duration,
    updates: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionController {
    pub fn new(config: EngineConfig, seed: Option<u64>) -> Result<Self> {
        config.validate().context("invalid engine configuration")?;
        let simulator = match seed {
            Some(seed) => PressureSimulator::with_seed(config.variance, seed),
            None => PressureSimulator::new(config.variance),
        };
        Ok(Self::from_session(PostureSession::new(config, simulator)))
    }

    pub fn from_session(session: PostureSession) -> Self {
        let tick_interval = session.config().cadence.tick_period();
        let (updates, _) = watch::channel(SessionSnapshot::capture(&session));

        Self {
            session: Arc::new(Mutex::new(session)),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval,
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.session.lock().await;
        SessionSnapshot::capture(&guard)
    }

    /// Starts ticking if the session is running and no ticker exists yet.
    pub async fn start(&self) -> SessionSnapshot {
        let mut ticker_guard = self.ticker.lock().await;
        let snapshot = self.snapshot().await;
        if snapshot.status == SessionStatus::Running && ticker_guard.is_none() {
            *ticker_guard = Some(self.spawn_ticker());
        }
        snapshot
    }

    /// Flips running/paused. Pausing guarantees no further ticks until resumed;
    /// resuming leaves exactly one ticker.
    pub async fn toggle(&self) -> SessionStatus {
        let mut ticker_guard = self.ticker.lock().await;
        let status = {
            let mut session = self.session.lock().await;
            let status = session.toggle();
            self.publish(&session);
            status
        };

        if let Some(previous) = ticker_guard.take() {
            previous.stop();
        }
        if status == SessionStatus::Running {
            *ticker_guard = Some(self.spawn_ticker());
        }
        status
    }

    pub async fn reset(&self) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.reset();
        self.publish(&session)
    }

    pub async fn record_break_taken(&self) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.record_break_taken();
        self.publish(&session)
    }

    pub async fn has_active_ticker(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map_or(false, Ticker::is_active)
    }

    /// Pauses the session and stops the ticker.
    pub async fn shutdown(&self) -> SessionSnapshot {
        let mut ticker_guard = self.ticker.lock().await;
        let snapshot = {
            let mut session = self.session.lock().await;
            session.set_status(SessionStatus::Paused);
            self.publish(&session)
        };
        if let Some(ticker) = ticker_guard.take() {
            ticker.stop();
        }
        log_info!(
            "session {} shut down after {} ticks",
            snapshot.session_id,
            snapshot.ticks
        );
        snapshot
    }

    fn spawn_ticker(&self) -> Ticker {
        Ticker::spawn(
            self.tick_interval,
            self.session.clone(),
            self.updates.clone(),
        )
    }

    /// Must be called with the session lock held so published snapshots
    /// follow the order of state changes.
    fn publish(&self, session: &PostureSession) -> SessionSnapshot {
        let snapshot = SessionSnapshot::capture(session);
        self.updates.send_replace(snapshot.clone());
        snapshot
    }
}
