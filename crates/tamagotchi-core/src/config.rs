//! Runtime configuration for a session.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use tamagotchi_logic::constants::{STORAGE_KEY, TICK_INTERVAL_MS};
use tamagotchi_logic::AnimalCatalog;

use crate::persistence::FileStore;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between two stat ticks.
    pub tick_interval: Duration,
    /// Directory holding the storage file.
    pub storage_dir: PathBuf,
    /// Storage key, also the file stem.
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            storage_dir: default_storage_dir(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

/// Platform data directory, or the working directory when there is none.
pub fn default_storage_dir() -> PathBuf {
    ProjectDirs::from("", "", "tamagotchi")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl SessionConfig {
    pub fn store(&self) -> FileStore {
        FileStore::with_key(&self.storage_dir, &self.storage_key)
    }

    /// Open a file-backed session with the built-in catalog.
    pub fn open_session(&self) -> Session<FileStore> {
        Session::open(self.store(), AnimalCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert_eq!(config.storage_key, "tamagotchi");
        assert!(config.store().path().ends_with("tamagotchi.json"));
    }
}
