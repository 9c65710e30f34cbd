use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::controller::SessionSnapshot;
use super::state::PostureSession;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// One repeating tick source bound to a session.
///
/// The first firing happens one full period after `spawn`. Each firing takes
/// the session lock, re-checks that the session is running and applies
/// exactly one tick.
pub struct Ticker {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl Ticker {
    pub fn spawn(
        period: Duration,
        session: Arc<Mutex<PostureSession>>,
        updates: Arc<watch::Sender<SessionSnapshot>>,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let handle = tokio::spawn(tick_loop(period, session, updates, token_clone));
        log_info!("ticker started ({} ms period)", period.as_millis());

        Self {
            handle,
            cancel_token,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel_token.is_cancelled() && !self.handle.is_finished()
    }

    /// Stops future firings. A firing already holding the session lock
    /// finishes first; callers mark the session paused before stopping, so it
    /// cannot apply a tick.
    pub fn stop(self) {
        self.cancel_token.cancel();
        self.handle.abort();
        log_info!("ticker stopped");
    }
}

async fn tick_loop(
    period: Duration,
    session: Arc<Mutex<PostureSession>>,
    updates: Arc<watch::Sender<SessionSnapshot>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut guard = session.lock().await;
                if cancel_token.is_cancelled() || guard.tick().is_none() {
                    break;
                }
                // published under the lock so a concurrent toggle or reset
                // cannot be overwritten by this older snapshot
                updates.send_replace(SessionSnapshot::capture(&guard));
            }
            _ = cancel_token.cancelled() => {
                break;
            }
        }
    }
}
