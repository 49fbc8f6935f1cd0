mod database;
mod settings;

pub use database::Database;
pub use settings::Settings;

use std::path::PathBuf;

use crate::error::StorageError;

/// Key-value snapshot storage.
///
/// Each record is persisted as one full serialized snapshot under a fixed
/// key - no deltas. The application shell receives the store by injection;
/// the timer and score engines never see it.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/pomofocus[-dev]/` based on POMOFOCUS_ENV.
///
/// Set POMOFOCUS_ENV=dev to use the development data directory, or
/// POMOFOCUS_DATA_DIR to override the location entirely (tests do).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = if let Ok(dir) = std::env::var("POMOFOCUS_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("POMOFOCUS_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("pomofocus-dev")
        } else {
            base_dir.join("pomofocus")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
