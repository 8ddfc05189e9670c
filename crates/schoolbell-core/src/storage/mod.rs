//! JSON-file key-value persistence.
//!
//! localStorage-style store: one JSON file per key under the platform config
//! dir (`~/.config/schoolbell/` on Linux). Reads always recover -- a missing
//! or corrupt value yields the caller's fallback, logged and never surfaced.
//! Writes report failures so the host can tell the user the edit was lost.
//!
//! Persisted values: the schedule (bare JSON array of periods), the sound
//! preference (bare boolean) and an optional sound file path.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::schedule::Schedule;

const SCHEDULE_KEY: &str = "schedule";
const SOUND_ENABLED_KEY: &str = "sound-enabled";
const SOUND_FILE_KEY: &str = "sound-file";

/// Key-value store backed by one JSON file per key.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store at the platform config location.
    pub fn open() -> Result<Self, StorageError> {
        let dir = dirs::config_dir()
            .ok_or(StorageError::NoConfigDir)?
            .join("schoolbell");
        Ok(Self { dir })
    }

    /// Open a store rooted at an explicit directory (tests, overrides).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_schedule(&self, fallback: Schedule) -> Schedule {
        self.get(SCHEDULE_KEY).unwrap_or(fallback)
    }

    pub fn save_schedule(&self, schedule: &Schedule) -> Result<(), StorageError> {
        self.set(SCHEDULE_KEY, schedule)
    }

    /// Sound preference; absent or unreadable means off.
    pub fn load_sound_enabled(&self) -> bool {
        self.get(SOUND_ENABLED_KEY).unwrap_or(false)
    }

    pub fn save_sound_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.set(SOUND_ENABLED_KEY, &enabled)
    }

    /// Custom bell sound file, if one was configured.
    pub fn load_sound_file(&self) -> Option<PathBuf> {
        self.get(SOUND_FILE_KEY)
    }

    pub fn save_sound_file(&self, path: Option<&PathBuf>) -> Result<(), StorageError> {
        match path {
            Some(p) => self.set(SOUND_FILE_KEY, p),
            None => {
                // Removing a never-written key is fine.
                match fs::remove_file(self.path(SOUND_FILE_KEY)) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(StorageError::WriteFailed {
                        path: self.path(SOUND_FILE_KEY),
                        message: e.to_string(),
                    }),
                }
            }
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = fs::read_to_string(self.path(key)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring corrupt stored value '{key}': {e}");
                None
            }
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path(key);
        let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::EncodeFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| StorageError::WriteFailed {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Period;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_schedule_yields_fallback() {
        let (_dir, store) = store();
        let fallback = Schedule::default_school_day();
        assert_eq!(store.load_schedule(fallback.clone()), fallback);
    }

    #[test]
    fn corrupt_schedule_yields_fallback() {
        let (_dir, store) = store();
        fs::create_dir_all(&store.dir).unwrap();
        fs::write(store.path(SCHEDULE_KEY), "{not json").unwrap();
        let fallback = Schedule::default_school_day();
        assert_eq!(store.load_schedule(fallback.clone()), fallback);
    }

    #[test]
    fn schedule_round_trips_as_bare_array() {
        let (_dir, store) = store();
        let schedule = Schedule::new(vec![Period::new("P1", "08:00", "08:45")]);
        store.save_schedule(&schedule).unwrap();

        let raw = fs::read_to_string(store.path(SCHEDULE_KEY)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());

        assert_eq!(store.load_schedule(Schedule::default()), schedule);
    }

    #[test]
    fn sound_preference_defaults_to_off() {
        let (_dir, store) = store();
        assert!(!store.load_sound_enabled());
        store.save_sound_enabled(true).unwrap();
        assert!(store.load_sound_enabled());

        let raw = fs::read_to_string(store.path(SOUND_ENABLED_KEY)).unwrap();
        assert_eq!(raw.trim(), "true");
    }

    #[test]
    fn sound_file_can_be_set_and_cleared() {
        let (_dir, store) = store();
        assert!(store.load_sound_file().is_none());
        // Clearing before ever setting is not an error.
        store.save_sound_file(None).unwrap();

        let path = PathBuf::from("/tmp/bell.mp3");
        store.save_sound_file(Some(&path)).unwrap();
        assert_eq!(store.load_sound_file(), Some(path));

        store.save_sound_file(None).unwrap();
        assert!(store.load_sound_file().is_none());
    }
}
