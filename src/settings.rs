use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::RwLock};

use crate::posture::EngineConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    pub audio_enabled: bool,
    /// On-screen alerts cannot be switched off.
    pub visual_enabled: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            visual_enabled: true,
        }
    }
}

/// Engine configuration fixed at startup plus in-memory alert preferences.
pub struct SettingsStore {
    engine: EngineConfig,
    alerts: RwLock<AlertSettings>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SettingsStore {
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            alerts: RwLock::new(AlertSettings::default()),
        }
    }

    /// Loads the engine configuration from a JSON file. A missing file yields
    /// the defaults; an unreadable or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let engine = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let engine: EngineConfig = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
            engine
                .validate()
                .with_context(|| format!("Invalid settings in {}", path.display()))?;
            engine
        } else {
            EngineConfig::default()
        };

        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> EngineConfig {
        self.engine
    }

    pub fn alerts(&self) -> AlertSettings {
        match self.alerts.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        self.update_alerts(|alerts| alerts.audio_enabled = enabled);
    }

    fn update_alerts(&self, apply: impl FnOnce(&mut AlertSettings)) {
        let mut guard = match self.alerts.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut guard);
        guard.visual_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(store.engine(), EngineConfig::default());
        assert_eq!(store.alerts(), AlertSettings::default());
    }

    #[test]
    fn loads_partial_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"ranges": {"maxImbalance": 20}, "variance": {"seatCenter": 2}}"#,
        )
        .unwrap();

        let engine = SettingsStore::load(&path).unwrap().engine();
        assert_eq!(engine.ranges.max_imbalance, 20.0);
        assert_eq!(engine.ranges.center_min, 40.0);
        assert_eq!(engine.variance.seat_center, 2.0);
        assert_eq!(engine.variance.left_side, 8.0);
    }

    #[test]
    fn rejects_invalid_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"weights": {"balance": 0.9}}"#).unwrap();

        let err = SettingsStore::load(&path).err().unwrap();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid settings"));
        assert!(message.contains("sum to 1.0"));
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(SettingsStore::load(&path).is_err());
    }

    #[test]
    fn alert_preferences_update_in_memory() {
        let store = SettingsStore::default();
        store.set_audio_enabled(false);

        let alerts = store.alerts();
        assert!(!alerts.audio_enabled);
        assert!(alerts.visual_enabled);

        store.set_audio_enabled(true);
        assert!(store.alerts().audio_enabled);
    }
}
