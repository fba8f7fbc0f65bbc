//! Persistence for playlog
//!
//! Games round-trip through a [`GameRepository`], backed either by a JSON
//! file or by an SQLite database. The collections a user keeps live in a
//! separate [`LibraryFile`].

mod database;
mod json;
mod library_file;

pub use database::SqliteRepository;
pub use json::JsonRepository;
pub use library_file::LibraryFile;

use playlog_core::{CollectionError, Game, ParsePlatformError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored data: {0}")]
    Format(String),

    #[error("Unsupported storage format: {0}")]
    UnsupportedFormat(String),
}

impl StorageError {
    /// True when the data was readable but its content is malformed
    pub fn is_format(&self) -> bool {
        matches!(self, StorageError::Format(_))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            StorageError::Io(err.into())
        } else {
            StorageError::Format(err.to_string())
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Format(err.to_string())
    }
}

impl From<ParsePlatformError> for StorageError {
    fn from(err: ParsePlatformError) -> Self {
        StorageError::Format(err.to_string())
    }
}

impl From<CollectionError> for StorageError {
    fn from(err: CollectionError) -> Self {
        StorageError::Format(err.to_string())
    }
}

/// Durable storage for a flat list of games
///
/// Title, genre, platform, hours played, status and rating survive a
/// save/load cycle unchanged, including an absent rating.
pub trait GameRepository {
    /// Replace the stored games with `games`
    fn save_games(&mut self, games: &[Game]) -> Result<(), StorageError>;

    /// Read back every stored game in saved order
    fn load_games(&self) -> Result<Vec<Game>, StorageError>;
}

/// On-disk format of a game export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Sqlite,
}

impl StorageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageFormat {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "sqlite" | "db" => Ok(StorageFormat::Sqlite),
            other => Err(StorageError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Open the repository for `format` at `path`
pub fn open_repository(
    format: StorageFormat,
    path: impl AsRef<Path>,
) -> Result<Box<dyn GameRepository>, StorageError> {
    let repository: Box<dyn GameRepository> = match format {
        StorageFormat::Json => Box::new(JsonRepository::new(path.as_ref())),
        StorageFormat::Sqlite => Box::new(SqliteRepository::open(path)?),
    };
    Ok(repository)
}
