//! Integration tests for game persistence

use playlog_core::{Game, GameRecord, GameStatus, Platform, Report, ValidationError};
use playlog_storage::{
    GameRepository, JsonRepository, LibraryFile, SqliteRepository, StorageFormat, open_repository,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment for persistence tests
struct StorageTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl StorageTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();

        Self { temp_dir, data_dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

/// Games covering every state worth persisting
fn sample_games() -> Vec<Game> {
    let fresh = Game::mobile("Monument Valley", "Puzzle").unwrap();

    let mut playing = Game::pc("Factorio", "Strategy").unwrap();
    playing.set_hours_played(312.25).unwrap();
    playing.set_status(GameStatus::Playing).unwrap();

    let mut rated = Game::console("Hollow Knight", "Metroidvania").unwrap();
    rated.set_hours_played(41.7).unwrap();
    rated.set_status(GameStatus::Finished).unwrap();
    rated.set_rating(9.5).unwrap();

    let mut zero = Game::pc("Bad Rats", "Puzzle").unwrap();
    zero.set_hours_played(1.0).unwrap();
    zero.set_status(GameStatus::Finished).unwrap();
    zero.set_rating(0.0).unwrap();

    // Rated, then moved away from finished with hours lowered
    let mut unfinished = Game::console("Dark Souls", "Action RPG").unwrap();
    unfinished.set_hours_played(80.0).unwrap();
    unfinished.set_status(GameStatus::Finished).unwrap();
    unfinished.set_rating(8.0).unwrap();
    unfinished.set_status(GameStatus::Abandoned).unwrap();
    unfinished.set_hours_played(0.1).unwrap();

    vec![fresh, playing, rated, zero, unfinished]
}

fn assert_same_fields(expected: &[Game], actual: &[Game]) {
    assert_eq!(expected.len(), actual.len());
    for (a, b) in expected.iter().zip(actual) {
        assert_eq!(a.title(), b.title());
        assert_eq!(a.genre(), b.genre());
        assert_eq!(a.platform(), b.platform());
        assert_eq!(a.hours_played(), b.hours_played(), "hours of {}", a.title());
        assert_eq!(a.status(), b.status(), "status of {}", a.title());
        assert_eq!(a.rating(), b.rating(), "rating of {}", a.title());
    }
}

#[test]
fn test_json_roundtrip() {
    let env = StorageTestEnv::new();
    let games = sample_games();

    let mut repo = JsonRepository::new(env.path("games.json"));
    repo.save_games(&games).unwrap();

    let loaded = JsonRepository::new(env.path("games.json")).load_games().unwrap();
    assert_same_fields(&games, &loaded);
}

#[test]
fn test_sqlite_roundtrip() {
    let env = StorageTestEnv::new();
    let games = sample_games();

    {
        let mut repo = SqliteRepository::open(env.path("games.db")).unwrap();
        repo.save_games(&games).unwrap();
    }

    let repo = SqliteRepository::open(env.path("games.db")).unwrap();
    assert_eq!(repo.game_count().unwrap(), games.len() as i64);
    assert_same_fields(&games, &repo.load_games().unwrap());
}

#[test]
fn test_open_repository_by_format() {
    let env = StorageTestEnv::new();
    let games = sample_games();

    for (format, file) in [
        (StorageFormat::Json, "export.json"),
        (StorageFormat::Sqlite, "export.db"),
    ] {
        let mut repo = open_repository(format, env.path(file)).unwrap();
        repo.save_games(&games).unwrap();

        let repo = open_repository(format, env.path(file)).unwrap();
        assert_same_fields(&games, &repo.load_games().unwrap());
    }
}

#[test]
fn test_reports_survive_reload() {
    let env = StorageTestEnv::new();
    let games = sample_games();

    let mut repo = JsonRepository::new(env.path("games.json"));
    repo.save_games(&games).unwrap();
    let loaded = repo.load_games().unwrap();

    let before = Report::new(&games);
    let after = Report::new(&loaded);
    assert_eq!(before.summary(), after.summary());
    assert_eq!(
        after.filter_by_platform("console").len(),
        games
            .iter()
            .filter(|game| game.platform() == Platform::Console)
            .count()
    );
    // Zero rating is stored but still left out of the ranking
    let ranked: Vec<_> = after
        .sort_by_rating_desc()
        .into_iter()
        .map(Game::title)
        .collect();
    assert_eq!(ranked, vec!["Hollow Knight", "Dark Souls"]);
}

#[test]
fn test_library_file_roundtrip() {
    let env = StorageTestEnv::new();
    let file = LibraryFile::new(env.path("library.json"));

    let mut library = file.load().unwrap();
    let collection = library.create_collection("everything").unwrap();
    for game in sample_games() {
        collection.add(game).unwrap();
    }
    file.save(&library).unwrap();

    let loaded = file.load().unwrap();
    let games: Vec<Game> = loaded.games(Some("everything")).cloned().collect();
    assert_same_fields(&sample_games(), &games);
}

#[test]
fn test_infinite_hours_never_reach_disk() {
    let env = StorageTestEnv::new();
    let file = LibraryFile::new(env.path("library.json"));

    let mut library = file.load().unwrap();
    let collection = library.create_collection("everything").unwrap();
    let mut game = Game::pc("Factorio", "Strategy").unwrap();
    assert_eq!(
        game.set_hours_played(f64::INFINITY).unwrap_err(),
        ValidationError::NonFiniteHours(f64::INFINITY)
    );
    game.set_hours_played(f64::MAX).unwrap();
    collection.add(game).unwrap();
    file.save(&library).unwrap();

    let loaded = file.load().unwrap();
    let game = loaded.games(None).next().unwrap();
    assert_eq!(game.hours_played(), f64::MAX);

    let record = GameRecord {
        hours_played: f64::INFINITY,
        ..game.to_record()
    };
    assert!(Game::from_record(record).is_err());
}
