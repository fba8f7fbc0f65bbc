//! The set of named collections a user keeps

use crate::{Collection, CollectionError, Game, GameRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Named collections, kept in name order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "LibraryRecord", into = "LibraryRecord")]
pub struct Library {
    collections: BTreeMap<String, Collection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LibraryRecord {
    #[serde(default)]
    collections: BTreeMap<String, LibraryEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LibraryEntry {
    #[serde(default)]
    games: Vec<GameRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection. Existing names are never overwritten.
    pub fn create_collection(&mut self, name: &str) -> Result<&mut Collection, CollectionError> {
        if self.collections.contains_key(name) {
            return Err(CollectionError::AlreadyExists(name.to_string()));
        }
        info!("Creating collection '{}'", name);
        Ok(self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(name)))
    }

    /// Delete a collection, returning it if it existed
    pub fn delete_collection(&mut self, name: &str) -> Option<Collection> {
        let removed = self.collections.remove(name);
        if removed.is_some() {
            info!("Deleted collection '{}'", name);
        } else {
            debug!("No collection named '{}' to delete", name);
        }
        removed
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.get_mut(name)
    }

    /// Collection names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Games of one collection, or of every collection when `scope` is `None`.
    ///
    /// An unknown collection name yields no games.
    pub fn games<'a, 's>(
        &'a self,
        scope: Option<&'s str>,
    ) -> impl Iterator<Item = &'a Game> + use<'a, 's> {
        self.collections
            .iter()
            .filter(move |(name, _)| scope.is_none_or(|wanted| wanted == name.as_str()))
            .flat_map(|(_, collection)| collection.iter())
    }
}

impl TryFrom<LibraryRecord> for Library {
    type Error = CollectionError;

    fn try_from(record: LibraryRecord) -> Result<Self, Self::Error> {
        let mut library = Library::new();
        for (name, entry) in record.collections {
            let collection = library.create_collection(&name)?;
            for game in entry.games {
                collection.add(Game::from_record(game)?)?;
            }
        }
        Ok(library)
    }
}

impl From<Library> for LibraryRecord {
    fn from(library: Library) -> Self {
        let collections = library
            .collections
            .into_iter()
            .map(|(name, collection)| {
                let games = collection.iter().map(GameRecord::from).collect();
                (name, LibraryEntry { games })
            })
            .collect();
        Self { collections }
    }
}
