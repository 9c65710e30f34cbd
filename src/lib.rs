pub mod posture;
pub mod report;
pub mod session;
pub mod settings;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use report::DailyAggregator;
use session::{SessionController, SessionSnapshot};
use settings::{AlertSettings, SettingsStore};

const ENABLE_LOGS: bool = true;

const CONFIG_PATH_VAR: &str = "POSTURE_MONITOR_CONFIG";
const SEED_VAR: &str = "POSTURE_MONITOR_SEED";
const REPORT_DIR_VAR: &str = "POSTURE_MONITOR_REPORT_DIR";
const AUDIO_VAR: &str = "POSTURE_MONITOR_AUDIO";

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Runs the monitor headless until Ctrl-C, logging every tick.
pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Posture monitor starting up...");

    let settings = match env_value(CONFIG_PATH_VAR) {
        Some(path) => SettingsStore::load(&PathBuf::from(path))?,
        None => SettingsStore::default(),
    };
    let seed = env_value(SEED_VAR)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}"))
        })
        .transpose()?;
    if let Some(raw) = env_value(AUDIO_VAR) {
        let enabled = parse_switch(&raw)
            .with_context(|| format!("{AUDIO_VAR} must be on or off, got {raw:?}"))?;
        settings.set_audio_enabled(enabled);
    }

    let controller = SessionController::new(settings.engine(), seed)?;
    let daily = DailyAggregator::new();
    let mut updates = controller.subscribe();
    let mut last = controller.start().await;
    log_info!("session {} running", last.session_id);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                report_tick(&last, &snapshot, &settings);
                last = snapshot;
            }
            _ = tokio::signal::ctrl_c() => {
                log_info!("interrupt received, stopping session");
                break;
            }
        }
    }

    let final_snapshot = controller.shutdown().await;
    log_info!(
        "session {} ended at {} with score {} ({} alerts, {} breaks suggested)",
        final_snapshot.session_id,
        final_snapshot.clock,
        final_snapshot.state.score,
        final_snapshot.state.alerts_triggered,
        final_snapshot.state.breaks_suggested
    );

    if let Some(dir) = env_value(REPORT_DIR_VAR) {
        if let Err(err) = daily.export().write_to_dir(&PathBuf::from(dir)) {
            log_error!("Failed to export daily report: {err:#}");
        }
    }

    Ok(())
}

/// Which user-facing cues a new snapshot calls for, compared to the last one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TickCues {
    audible_alert: bool,
    break_due: bool,
}

fn tick_cues(
    previous: &SessionSnapshot,
    current: &SessionSnapshot,
    alerts: &AlertSettings,
) -> TickCues {
    TickCues {
        audible_alert: alerts.audio_enabled
            && current.state.alerts_triggered > previous.state.alerts_triggered,
        break_due: current.state.breaks_suggested > previous.state.breaks_suggested,
    }
}

fn report_tick(previous: &SessionSnapshot, current: &SessionSnapshot, settings: &SettingsStore) {
    log::debug!(
        "{} score={} status={:?} tilt={:.1}",
        current.clock,
        current.state.score,
        current.state.status,
        current.state.tilt_angle
    );

    let cues = tick_cues(previous, current, &settings.alerts());
    if cues.audible_alert {
        log_info!("audible alert: posture {:?}", current.state.status);
    }
    if cues.break_due {
        log_info!(
            "time for a break: {}",
            current
                .break_advice
                .suggestions
                .iter()
                .map(|s| s.title)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}
