//! Command line definition

use clap::{Parser, Subcommand};
use playlog_core::Platform;
use playlog_storage::StorageFormat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playlog", version, about = "Track your games, collections and play time")]
pub struct Cli {
    /// Configuration file (defaults to $PLAYLOG_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Library file, overriding the configured one
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List collection names
    ListCollections,

    /// Create an empty collection
    CreateCollection { name: String },

    /// Delete a collection and its games
    DeleteCollection { name: String },

    /// List the games of a collection
    ListGames { collection: String },

    /// Add a game to a collection
    AddGame {
        collection: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        platform: Platform,
        /// Status name or label, e.g. PLAYING or "Not Started"
        #[arg(long)]
        status: String,
        #[arg(long, default_value_t = 0.0)]
        hours: f64,
        #[arg(long)]
        rating: Option<f64>,
    },

    /// Change fields of a game
    UpdateGame {
        collection: String,
        title: String,
        #[arg(long)]
        new_title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        platform: Option<Platform>,
        #[arg(long)]
        status: Option<String>,
        /// New total; may not be lower than the current one
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        rating: Option<f64>,
    },

    /// Remove every game with this title from a collection
    RemoveGame { collection: String, title: String },

    /// Start a game over: zero hours, playing, no rating
    ResetGame { collection: String, title: String },

    /// Total hours played
    TotalHours(Scope),

    /// Average rating of finished games
    AverageRating(Scope),

    /// Share of games in each status
    StatusPercentages(Scope),

    /// The five most played games
    TopGames(Scope),

    /// Games of a genre
    FilterGenre {
        genre: String,
        #[command(flatten)]
        scope: Scope,
    },

    /// Games on a platform
    FilterPlatform {
        platform: Platform,
        #[command(flatten)]
        scope: Scope,
    },

    /// Games in a status
    FilterStatus {
        status: String,
        #[command(flatten)]
        scope: Scope,
    },

    /// Games whose title contains the text
    Search {
        text: String,
        #[command(flatten)]
        scope: Scope,
    },

    /// Every game, most played first
    SortByHours(Scope),

    /// Rated games, best first
    SortByRating(Scope),

    /// Headline numbers
    Report(Scope),

    /// One-line summary of a game
    ShowGame { collection: String, title: String },

    /// Every field of a game
    ShowGameDetails { collection: String, title: String },

    /// Compare two games by identity and hours played
    CompareGames {
        collection: String,
        first: String,
        second: String,
    },

    /// Write games to a JSON or SQLite file
    Export {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_parser = parse_format)]
        format: Option<StorageFormat>,
        #[arg(long)]
        collection: Option<String>,
    },

    /// Read games from a JSON or SQLite file
    Import {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_parser = parse_format)]
        format: Option<StorageFormat>,
        /// Add the loaded games to this collection (created if missing)
        #[arg(long)]
        into: Option<String>,
    },
}

/// Which games a report covers
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Scope {
    /// Only this collection (default: all collections)
    #[arg(long)]
    pub collection: Option<String>,
}

fn parse_format(value: &str) -> Result<StorageFormat, String> {
    value.parse().map_err(|err: playlog_storage::StorageError| err.to_string())
}
