//! JSON key/value store for the settings.
//!
//! The file is a flat object with three integer keys:
//!
//! ```json
//! { "interval": 1000, "step": 10, "enabled": 1 }
//! ```
//!
//! Keys are read one by one. A key that is missing, of the wrong type or out
//! of range is skipped and the compiled-in default stays in effect.

use crate::platform::SettingsStore;
use crate::settings::{StoredSettings, DEFAULT_ENABLED, DEFAULT_INTERVAL_MS, DEFAULT_STEP};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "laflor";
const FILE_NAME: &str = "settings.json";

const KEY_INTERVAL: &str = "interval";
const KEY_STEP: &str = "step";
const KEY_ENABLED: &str = "enabled";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Record {
    interval: u32,
    step: u32,
    enabled: u8,
}

/// `<config dir>/laflor/settings.json`
pub fn default_path() -> Result<PathBuf, StoreError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or(StoreError::NoConfigDir)
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonStore {
    fn load(&self) -> StoredSettings {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", self.path.display());
                return StoredSettings::default();
            }
            Err(e) => {
                log::warn!("failed to read {}: {e}", self.path.display());
                return StoredSettings::default();
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&contents) {
            Ok(map) => {
                let stored = parse_map(&map);
                log::debug!("loaded {stored:?} from {}", self.path.display());
                stored
            }
            Err(e) => {
                log::warn!("ignoring malformed settings in {}: {e}", self.path.display());
                StoredSettings::default()
            }
        }
    }

    fn save(&self, settings: &StoredSettings) -> Result<(), StoreError> {
        let record = Record {
            interval: settings.interval.unwrap_or(DEFAULT_INTERVAL_MS),
            step: settings.step.unwrap_or(DEFAULT_STEP),
            enabled: u8::from(settings.enabled.unwrap_or(DEFAULT_ENABLED)),
        };
        let json = serde_json::to_string_pretty(&record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("saved {settings:?} to {}", self.path.display());
        Ok(())
    }
}

fn parse_map(map: &Map<String, Value>) -> StoredSettings {
    StoredSettings {
        interval: positive(map, KEY_INTERVAL),
        step: positive(map, KEY_STEP),
        enabled: flag(map, KEY_ENABLED),
    }
}

fn positive(map: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = map.get(key)?;
    let parsed = value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0);
    if parsed.is_none() {
        log::warn!("ignoring stored {key}: {value}");
    }
    parsed
}

fn flag(map: &Map<String, Value>, key: &str) -> Option<bool> {
    let value = map.get(key)?;
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    };
    if parsed.is_none() {
        log::warn!("ignoring stored {key}: {value}");
    }
    parsed
}
