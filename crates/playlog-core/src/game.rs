//! Game entity with validated fields

use crate::{GameStatus, Platform, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Hours a game needs before it can be marked finished
pub const MIN_HOURS_TO_FINISH: f64 = 1.0;

/// Lowest accepted rating
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted rating
pub const RATING_MAX: f64 = 10.0;

/// A tracked game
///
/// Fields can only change through the validating setters or [`Game::reset`].
/// A failed call leaves the game exactly as it was.
///
/// Two games are equal when they share a title (ignoring case) and a
/// platform. Genre, hours, status and rating take no part in equality.
#[derive(Clone)]
pub struct Game {
    title: String,
    genre: String,
    platform: Platform,
    hours_played: f64,
    status: GameStatus,
    rating: Option<f64>,
}

/// Persisted form of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    #[serde(default)]
    pub genre: String,
    pub platform: Platform,
    #[serde(default)]
    pub hours_played: f64,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Game {
    /// Create a not-started game with no hours and no rating
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        platform: Platform,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title.into())?,
            genre: genre.into(),
            platform,
            hours_played: 0.0,
            status: GameStatus::NotStarted,
            rating: None,
        })
    }

    pub fn pc(title: impl Into<String>, genre: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(title, genre, Platform::Pc)
    }

    pub fn console(
        title: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(title, genre, Platform::Console)
    }

    pub fn mobile(
        title: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(title, genre, Platform::Mobile)
    }

    /// Rebuild a game from its persisted form.
    ///
    /// Title, hours and rating range are checked. Status and rating are
    /// restored as stored, so states reached by lowering hours after finishing
    /// or by un-finishing a rated game survive a reload.
    pub fn from_record(record: GameRecord) -> Result<Self, ValidationError> {
        let mut game = Self::new(record.title, record.genre, record.platform)?;
        game.set_hours_played(record.hours_played)?;
        if let Some(rating) = record.rating {
            validate_rating(rating)?;
        }
        game.status = record.status;
        game.rating = record.rating;
        Ok(game)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn hours_played(&self) -> f64 {
        self.hours_played
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    /// Replace the title. Blank titles are rejected; surrounding whitespace is trimmed.
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.title = validate_title(value.into())?;
        Ok(())
    }

    pub fn set_genre(&mut self, value: impl Into<String>) {
        self.genre = value.into();
    }

    /// Replace hours played. Must be finite and non-negative.
    ///
    /// Lowering hours is allowed here; callers that track progress enforce
    /// their own no-decrease rule.
    pub fn set_hours_played(&mut self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteHours(value));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeHours(value));
        }
        self.hours_played = value;
        Ok(())
    }

    /// Move to another status. Finishing requires at least one hour played.
    ///
    /// A rating is kept when leaving `Finished`.
    pub fn set_status(&mut self, status: GameStatus) -> Result<(), ValidationError> {
        if status == GameStatus::Finished && self.hours_played < MIN_HOURS_TO_FINISH {
            return Err(ValidationError::PrematureFinish(self.hours_played));
        }
        debug!("{}: {} -> {}", self.title, self.status, status);
        self.status = status;
        Ok(())
    }

    /// Rate a finished game on a 0-10 scale
    pub fn set_rating(&mut self, value: f64) -> Result<(), ValidationError> {
        if self.status != GameStatus::Finished {
            return Err(ValidationError::RatingRequiresFinished);
        }
        validate_rating(value)?;
        self.rating = Some(value);
        Ok(())
    }

    /// Start over: zero hours, back to playing, rating cleared
    pub fn reset(&mut self) -> Result<(), ValidationError> {
        if self.status == GameStatus::NotStarted {
            return Err(ValidationError::ResetNotStarted);
        }
        debug!("Resetting {} from {}", self.title, self.status);
        self.hours_played = 0.0;
        self.status = GameStatus::Playing;
        self.rating = None;
        Ok(())
    }

    /// Order by hours played, ascending. Equal hours compare equal.
    pub fn compare_hours(&self, other: &Game) -> Ordering {
        self.hours_played.total_cmp(&other.hours_played)
    }

    /// Short summary, `"{title} ({platform}) - {status}"`
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Every field, for diagnostics
    pub fn debug_describe(&self) -> String {
        format!("{:?}", self)
    }

    pub fn to_record(&self) -> GameRecord {
        GameRecord::from(self)
    }

    fn identity_title(&self) -> String {
        self.title.to_lowercase()
    }
}

fn validate_title(value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

fn validate_rating(value: f64) -> Result<(), ValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(ValidationError::RatingOutOfRange(value));
    }
    Ok(())
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.platform == other.platform && self.identity_title() == other.identity_title()
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_title().hash(state);
        self.platform.hash(state);
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.title, self.platform, self.status)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("title", &self.title)
            .field("platform", &self.platform.as_str())
            .field("status", &self.status.label())
            .field("hours", &self.hours_played)
            .field("genre", &self.genre)
            .field("rating", &self.rating)
            .finish()
    }
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            genre: game.genre.clone(),
            platform: game.platform,
            hours_played: game.hours_played,
            status: game.status,
            rating: game.rating,
        }
    }
}
