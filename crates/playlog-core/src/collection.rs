//! Named, deduplicated collections of games

use crate::{CollectionError, Game, GameRecord, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Ordered set of games
///
/// Insertion order is kept and no two members are equal under
/// [`Game`]'s identity (title ignoring case, plus platform).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CollectionRecord", into = "CollectionRecord")]
pub struct Collection {
    name: String,
    games: Vec<Game>,
}

/// Persisted form of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub name: String,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            games: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current members in insertion order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Append a game unless an equal one is already present
    pub fn add(&mut self, game: Game) -> Result<(), CollectionError> {
        if self.games.contains(&game) {
            return Err(self.duplicate(&game));
        }
        debug!("Adding {} to '{}'", game, self.name);
        self.games.push(game);
        Ok(())
    }

    /// Remove every game with this title, whatever its platform.
    ///
    /// Returns how many games were removed.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.games.len();
        self.games.retain(|game| !titles_match(game.title(), title));
        let removed = before - self.games.len();
        debug!("Removed {} game(s) titled '{}' from '{}'", removed, title, self.name);
        removed
    }

    /// First game with this title, ignoring case
    pub fn find(&self, title: &str) -> Option<&Game> {
        self.games.iter().find(|game| titles_match(game.title(), title))
    }

    /// Apply `f` to a copy of the first game with this title.
    ///
    /// The change is committed only if `f` succeeds and the result does not
    /// collide with another member.
    pub fn update<F>(&mut self, title: &str, f: F) -> Result<&Game, CollectionError>
    where
        F: FnOnce(Game) -> Result<Game, ValidationError>,
    {
        let index = self
            .games
            .iter()
            .position(|game| titles_match(game.title(), title))
            .ok_or_else(|| CollectionError::GameNotFound(title.to_string()))?;

        let updated = f(self.games[index].clone())?;
        let collides = self
            .games
            .iter()
            .enumerate()
            .any(|(i, game)| i != index && *game == updated);
        if collides {
            return Err(self.duplicate(&updated));
        }

        debug!("Updated {} in '{}'", updated, self.name);
        self.games[index] = updated;
        Ok(&self.games[index])
    }

    /// Summary line
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn duplicate(&self, game: &Game) -> CollectionError {
        CollectionError::Duplicate {
            title: game.title().to_string(),
            collection: self.name.clone(),
        }
    }
}

fn titles_match(title: &str, query: &str) -> bool {
    title.to_lowercase() == query.to_lowercase()
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection '{}' with {} games.", self.name, self.games.len())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

impl TryFrom<CollectionRecord> for Collection {
    type Error = CollectionError;

    fn try_from(record: CollectionRecord) -> Result<Self, Self::Error> {
        let mut collection = Collection::new(record.name);
        for game in record.games {
            collection.add(Game::from_record(game)?)?;
        }
        Ok(collection)
    }
}

impl From<Collection> for CollectionRecord {
    fn from(collection: Collection) -> Self {
        Self {
            games: collection.games.iter().map(GameRecord::from).collect(),
            name: collection.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, Platform};

    fn sample() -> Collection {
        let mut collection = Collection::new("favorites");
        collection.add(Game::console("Halo", "FPS").unwrap()).unwrap();
        collection.add(Game::pc("Halo", "FPS").unwrap()).unwrap();
        collection.add(Game::pc("Stardew Valley", "Sim").unwrap()).unwrap();
        collection
    }

    #[test]
    fn test_new_collection_is_empty() {
        let collection = Collection::new("backlog");
        assert_eq!(collection.name(), "backlog");
        assert!(collection.is_empty());
        assert_eq!(collection.describe(), "Collection 'backlog' with 0 games.");
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let collection = sample();
        let titles: Vec<_> = collection
            .iter()
            .map(|game| (game.title(), game.platform()))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("Halo", Platform::Console),
                ("Halo", Platform::Pc),
                ("Stardew Valley", Platform::Pc),
            ]
        );
        assert_eq!(collection.describe(), "Collection 'favorites' with 3 games.");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut collection = Collection::new("shooters");
        collection.add(Game::console("Halo", "FPS").unwrap()).unwrap();

        let err = collection
            .add(Game::console("HALO", "RPG").unwrap())
            .unwrap_err();
        assert!(matches!(err, CollectionError::Duplicate { .. }));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.games()[0].genre(), "FPS");
    }

    #[test]
    fn test_remove_matches_title_only() {
        let mut collection = sample();
        assert_eq!(collection.remove("halo"), 2);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.remove("Missing"), 0);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_find() {
        let collection = sample();
        let game = collection.find("STARDEW valley").unwrap();
        assert_eq!(game.title(), "Stardew Valley");
        assert!(collection.find("Stardew").is_none());
    }

    #[test]
    fn test_update_commits_on_success() {
        let mut collection = sample();
        let game = collection
            .update("stardew valley", |mut game| {
                game.set_hours_played(12.0)?;
                game.set_status(GameStatus::Finished)?;
                Ok(game)
            })
            .unwrap();
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(collection.find("Stardew Valley").unwrap().hours_played(), 12.0);
    }

    #[test]
    fn test_update_is_atomic() {
        let mut collection = sample();
        let err = collection
            .update("Stardew Valley", |mut game| {
                game.set_hours_played(0.5)?;
                game.set_status(GameStatus::Finished)?;
                Ok(game)
            })
            .unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Validation(ValidationError::PrematureFinish(_))
        ));
        assert_eq!(collection.find("Stardew Valley").unwrap().hours_played(), 0.0);
    }

    #[test]
    fn test_update_rejects_identity_collision() {
        let mut collection = sample();
        let err = collection
            .update("Stardew Valley", |mut game| {
                game.set_title("halo")?;
                Ok(game)
            })
            .unwrap_err();
        assert!(matches!(err, CollectionError::Duplicate { .. }));
        assert!(collection.find("Stardew Valley").is_some());
    }

    #[test]
    fn test_update_missing_game() {
        let mut collection = sample();
        let err = collection.update("Zelda", Ok).unwrap_err();
        assert_eq!(err, CollectionError::GameNotFound("Zelda".to_string()));
    }

    #[test]
    fn test_serde_rejects_duplicates() {
        let json = r#"{"name":"dupes","games":[
            {"title":"Halo","genre":"FPS","platform":"Console","hours_played":1.0,"status":"Playing","rating":null},
            {"title":"halo","genre":"FPS","platform":"Console","hours_played":2.0,"status":"Playing","rating":null}
        ]}"#;
        assert!(serde_json::from_str::<Collection>(json).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let collection = sample();
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["name"], "favorites");
        assert_eq!(json["games"].as_array().unwrap().len(), 3);

        let parsed: Collection = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.games(), collection.games());
    }
}
