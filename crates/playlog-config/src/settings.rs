//! Storage and logging settings

use playlog_storage::StorageFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the library under the data directory
pub const LIBRARY_FILE_NAME: &str = "library.json";

/// Where games and collections are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding every collection
    #[serde(default = "default_library_path")]
    pub library_path: PathBuf,

    /// Format used by `export`/`import` when none is given
    #[serde(default)]
    pub export_format: StorageFormat,

    /// File used by `export`/`import` when none is given
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

/// `~/.playlog/library.json`, or a file in the working directory when
/// there is no home directory
pub fn default_library_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".playlog").join(LIBRARY_FILE_NAME),
        None => {
            tracing::warn!("No home directory, keeping the library in the working directory");
            PathBuf::from("playlog-library.json")
        }
    }
}

fn default_export_path() -> PathBuf {
    PathBuf::from("games.json")
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            export_format: StorageFormat::default(),
            export_path: default_export_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
