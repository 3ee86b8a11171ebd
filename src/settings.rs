use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{Mutex, RwLock},
};

use crate::units::{AppearanceMode, TemperatureUnit};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub appearance_mode: AppearanceMode,
    pub temperature_unit: TemperatureUnit,
}

/// Where preferences live between launches.
pub trait SettingsBackend: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<UserSettings>>;
    fn save(&self, settings: &UserSettings) -> Result<()>;
}

/// Pretty-printed JSON file, usually `settings.json` in the app data dir.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<UserSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        Ok(Some(settings))
    }

    fn save(&self, settings: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<UserSettings>>,
}

impl SettingsBackend for MemoryBackend {
    fn load(&self) -> Result<Option<UserSettings>> {
        Ok(self.saved.lock().map_err(|_| anyhow::anyhow!("settings lock poisoned"))?.clone())
    }

    fn save(&self, settings: &UserSettings) -> Result<()> {
        *self.saved.lock().map_err(|_| anyhow::anyhow!("settings lock poisoned"))? =
            Some(settings.clone());
        Ok(())
    }
}

/// Appearance and temperature preferences, read once at startup and written
/// through on every change.
pub struct SettingsStore {
    backend: Box<dyn SettingsBackend>,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(backend: Box<dyn SettingsBackend>) -> Self {
        let data = match backend.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => UserSettings::default(),
            Err(err) => {
                warn!("Ignoring unreadable settings, using defaults: {err:#}");
                UserSettings::default()
            }
        };

        Self {
            backend,
            data: RwLock::new(data),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        Self::new(Box::new(JsonFileBackend::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryBackend>::default())
    }

    pub fn snapshot(&self) -> UserSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn appearance_mode(&self) -> AppearanceMode {
        self.snapshot().appearance_mode
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.snapshot().temperature_unit
    }

    pub fn set_appearance_mode(&self, mode: AppearanceMode) -> Result<()> {
        self.update(|settings| settings.appearance_mode = mode)
    }

    pub fn set_temperature_unit(&self, unit: TemperatureUnit) -> Result<()> {
        self.update(|settings| settings.temperature_unit = unit)
    }

    fn update(&self, apply: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        let mut next = guard.clone();
        apply(&mut next);
        self.backend.save(&next)?;
        *guard = next;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let data = self.backend.load()?.unwrap_or_default();
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    impl SettingsBackend for FailingBackend {
        fn load(&self) -> Result<Option<UserSettings>> {
            Ok(None)
        }

        fn save(&self, _settings: &UserSettings) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn defaults_are_system_and_celsius() {
        let store = SettingsStore::in_memory();
        assert_eq!(store.appearance_mode(), AppearanceMode::System);
        assert_eq!(store.temperature_unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let store = SettingsStore::new(Box::new(FailingBackend));
        assert!(store.set_temperature_unit(TemperatureUnit::Fahrenheit).is_err());
        assert_eq!(store.temperature_unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn file_backend_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open(path.clone());
        store.set_appearance_mode(AppearanceMode::Dark).unwrap();
        store
            .set_temperature_unit(TemperatureUnit::Fahrenheit)
            .unwrap();

        let reopened = SettingsStore::open(path);
        assert_eq!(reopened.appearance_mode(), AppearanceMode::Dark);
        assert_eq!(reopened.temperature_unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let store = SettingsStore::open(path);
        assert_eq!(store.snapshot(), UserSettings::default());
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"temperatureUnit":"fahrenheit"}"#).unwrap();

        let store = SettingsStore::open(path);
        assert_eq!(store.temperature_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(store.appearance_mode(), AppearanceMode::System);
    }
}
