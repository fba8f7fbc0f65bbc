//! The JSON file holding every collection

use crate::StorageError;
use playlog_core::Library;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Location of the library document
///
/// The path is chosen by the caller (usually from configuration); nothing
/// here falls back to a process-wide default.
#[derive(Debug, Clone)]
pub struct LibraryFile {
    path: PathBuf,
}

impl LibraryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the library. A missing file is an empty library.
    pub fn load(&self) -> Result<Library, StorageError> {
        if !self.path.exists() {
            debug!("No library at {}, starting empty", self.path.display());
            return Ok(Library::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let library: Library = serde_json::from_str(&contents)?;
        debug!(
            "Loaded {} collections from {}",
            library.len(),
            self.path.display()
        );
        Ok(library)
    }

    /// Write the library, creating the parent directory if needed
    pub fn save(&self, library: &Library) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(library)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, contents)?;
        info!("Library saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlog_core::{Game, GameStatus};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_library() {
        let dir = TempDir::new().unwrap();
        let file = LibraryFile::new(dir.path().join("library.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let file = LibraryFile::new(dir.path().join("nested").join("library.json"));

        let mut library = Library::new();
        let collection = library.create_collection("backlog").unwrap();
        let mut game = Game::pc("Outer Wilds", "Adventure").unwrap();
        game.set_hours_played(22.5).unwrap();
        game.set_status(GameStatus::Finished).unwrap();
        game.set_rating(10.0).unwrap();
        collection.add(game).unwrap();
        library.create_collection("empty").unwrap();

        file.save(&library).unwrap();
        let loaded = file.load().unwrap();

        assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["backlog", "empty"]);
        let game = loaded.collection("backlog").unwrap().find("outer wilds").unwrap();
        assert_eq!(game.hours_played(), 22.5);
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.rating(), Some(10.0));
    }

    #[test]
    fn test_corrupt_library_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, r#"{"collections": {"a": {"games": [{"title": ""}]}}}"#).unwrap();

        let err = LibraryFile::new(&path).load().unwrap_err();
        assert!(err.is_format());
    }
}
