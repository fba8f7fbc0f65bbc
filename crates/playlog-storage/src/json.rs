//! Game export as a JSON array

use crate::{GameRepository, StorageError};
use playlog_core::{Game, GameRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Games stored as a pretty-printed JSON array of records
#[derive(Debug, Clone)]
pub struct JsonRepository {
    path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameRepository for JsonRepository {
    fn save_games(&mut self, games: &[Game]) -> Result<(), StorageError> {
        let records: Vec<GameRecord> = games.iter().map(GameRecord::from).collect();
        let contents = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, contents)?;
        info!("Saved {} games to {}", games.len(), self.path.display());
        Ok(())
    }

    fn load_games(&self) -> Result<Vec<Game>, StorageError> {
        if !self.path.exists() {
            debug!("{} does not exist, no games to load", self.path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let records: Vec<GameRecord> = serde_json::from_str(&contents)?;
        let games = records
            .into_iter()
            .map(Game::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        info!("Loaded {} games from {}", games.len(), self.path.display());
        Ok(games)
    }
}
