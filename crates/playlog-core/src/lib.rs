//! Core model for playlog
//!
//! Games with a play-progress lifecycle, deduplicated collections of games,
//! and read-only reports over any sequence of games. Nothing in this crate
//! performs I/O; persistence lives in `playlog-storage`.

mod collection;
mod game;
mod library;
mod platform;
mod report;
mod status;

pub use collection::{Collection, CollectionRecord};
pub use game::{Game, GameRecord, MIN_HOURS_TO_FINISH, RATING_MAX, RATING_MIN};
pub use library::Library;
pub use platform::{ParsePlatformError, Platform};
pub use report::{Report, ReportSummary, TOP_GAMES};
pub use status::GameStatus;

use thiserror::Error;

/// A game field or cross-field rule was violated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Game title cannot be empty")]
    EmptyTitle,

    #[error("Hours played cannot be negative: {0}")]
    NegativeHours(f64),

    #[error("Hours played must be a finite number: {0}")]
    NonFiniteHours(f64),

    #[error("Cannot finish a game with less than 1h played ({0}h)")]
    PrematureFinish(f64),

    #[error("Only finished games can be rated")]
    RatingRequiresFinished,

    #[error("Rating must be between 0 and 10: {0}")]
    RatingOutOfRange(f64),

    #[error("Cannot reset a game that has not been started")]
    ResetNotStarted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    #[error("Game '{title}' is already in collection '{collection}'")]
    Duplicate { title: String, collection: String },

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Collection already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
