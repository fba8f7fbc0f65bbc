//! Game export using SQLite

use crate::{GameRepository, StorageError};
use playlog_core::{Game, GameRecord, GameStatus, Platform};
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::info;

/// Games stored in an SQLite `games` table
pub struct SqliteRepository {
    conn: Connection,
}

/// Raw column values of one `games` row
type GameRow = (String, String, String, f64, String, Option<f64>);

impl SqliteRepository {
    /// Open or create a database
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        let repo = Self { conn };
        repo.init_schema()?;

        Ok(repo)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;

        let repo = Self { conn };
        repo.init_schema()?;

        Ok(repo)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                genre TEXT NOT NULL DEFAULT '',
                platform TEXT NOT NULL,
                hours_played REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                rating REAL
            );

            CREATE INDEX IF NOT EXISTS idx_games_title ON games(title);
        "#,
        )?;

        Ok(())
    }

    /// Get total game count
    pub fn game_count(&self) -> Result<i64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a row to a Game
    fn row_to_game(row: GameRow) -> Result<Game, StorageError> {
        let (title, genre, platform, hours_played, status, rating) = row;
        let platform: Platform = platform.parse()?;

        let game = Game::from_record(GameRecord {
            title,
            genre,
            platform,
            hours_played,
            status: GameStatus::from_name_or_label(&status),
            rating,
        })?;
        Ok(game)
    }
}

impl GameRepository for SqliteRepository {
    fn save_games(&mut self, games: &[Game]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM games", [])?;
        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO games (title, genre, platform, hours_played, status, rating)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            )?;
            for game in games {
                stmt.execute(params![
                    game.title(),
                    game.genre(),
                    game.platform().as_str(),
                    game.hours_played(),
                    game.status().label(),
                    game.rating(),
                ])?;
            }
        }
        tx.commit()?;

        info!("Saved {} games to SQLite", games.len());
        Ok(())
    }

    fn load_games(&self) -> Result<Vec<Game>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT title, genre, platform, hours_played, status, rating FROM games ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<Result<Vec<GameRow>, _>>()?;

        let games = rows
            .into_iter()
            .map(Self::row_to_game)
            .collect::<Result<Vec<_>, _>>()?;

        info!("Loaded {} games from SQLite", games.len());
        Ok(games)
    }
}
