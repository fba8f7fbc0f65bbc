//! Read-only reports over a sequence of games
//!
//! A [`Report`] borrows the games it is built from and never mutates them.
//! Every query recomputes from that sequence and tolerates an empty one.

use crate::{Game, GameStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// How many games the top ranking returns
pub const TOP_GAMES: usize = 5;

/// Aggregations, filters and rankings over borrowed games
#[derive(Debug, Clone, Default)]
pub struct Report<'a> {
    games: Vec<&'a Game>,
}

/// Headline numbers for a set of games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub game_count: usize,
    pub total_hours: f64,
    pub average_rating: f64,
    pub top_titles: Vec<String>,
}

impl<'a> Report<'a> {
    pub fn new(games: impl IntoIterator<Item = &'a Game>) -> Self {
        Self {
            games: games.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Sum of hours played
    pub fn total_hours(&self) -> f64 {
        self.games.iter().map(|game| game.hours_played()).sum()
    }

    /// Mean rating of finished games, 0 when none qualify.
    ///
    /// A rating of exactly 0 counts as unrated and is left out.
    pub fn average_rating_finished(&self) -> f64 {
        let ratings: Vec<f64> = self
            .games
            .iter()
            .filter(|game| game.status() == GameStatus::Finished)
            .filter_map(|game| counted_rating(game))
            .collect();

        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }

    /// Share of games in each status, as a percentage.
    ///
    /// Empty input gives an empty map; otherwise all four statuses are present.
    pub fn percentage_by_status(&self) -> BTreeMap<GameStatus, f64> {
        if self.games.is_empty() {
            return BTreeMap::new();
        }

        let total = self.games.len() as f64;
        GameStatus::ALL
            .into_iter()
            .map(|status| {
                let count = self.games.iter().filter(|game| game.status() == status).count();
                (status, count as f64 / total * 100.0)
            })
            .collect()
    }

    /// The `n` most played games, most hours first. Ties keep input order.
    pub fn top_by_hours(&self, n: usize) -> Vec<&'a Game> {
        let mut games = self.sort_by_hours_desc();
        games.truncate(n);
        games
    }

    pub fn top5_by_hours(&self) -> Vec<&'a Game> {
        self.top_by_hours(TOP_GAMES)
    }

    /// Games whose genre matches, ignoring case
    pub fn filter_by_genre(&self, genre: &str) -> Vec<&'a Game> {
        let genre = genre.to_lowercase();
        self.filter(|game| game.genre().to_lowercase() == genre)
    }

    /// Games whose platform tag matches, ignoring case
    pub fn filter_by_platform(&self, platform: &str) -> Vec<&'a Game> {
        let platform = platform.to_lowercase();
        self.filter(|game| game.platform().as_str().to_lowercase() == platform)
    }

    pub fn filter_by_status(&self, status: GameStatus) -> Vec<&'a Game> {
        self.filter(|game| game.status() == status)
    }

    /// Games whose title contains `text`, ignoring case
    pub fn search_by_title(&self, text: &str) -> Vec<&'a Game> {
        let text = text.to_lowercase();
        self.filter(|game| game.title().to_lowercase().contains(&text))
    }

    /// Every game, most hours first. Ties keep input order.
    pub fn sort_by_hours_desc(&self) -> Vec<&'a Game> {
        let mut games = self.games.clone();
        games.sort_by(|a, b| b.compare_hours(a));
        games
    }

    /// Rated games, best first. Unrated games (and zero ratings) are left out.
    pub fn sort_by_rating_desc(&self) -> Vec<&'a Game> {
        let mut rated: Vec<(&'a Game, f64)> = self
            .games
            .iter()
            .filter_map(|game| counted_rating(game).map(|rating| (*game, rating)))
            .collect();
        rated.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        rated.into_iter().map(|(game, _)| game).collect()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            game_count: self.games.len(),
            total_hours: self.total_hours(),
            average_rating: self.average_rating_finished(),
            top_titles: self
                .top5_by_hours()
                .into_iter()
                .map(|game| game.title().to_string())
                .collect(),
        }
    }

    fn filter(&self, keep: impl Fn(&Game) -> bool) -> Vec<&'a Game> {
        self.games.iter().copied().filter(|game| keep(game)).collect()
    }
}

// A stored rating of 0 is treated the same as no rating
fn counted_rating(game: &Game) -> Option<f64> {
    game.rating().filter(|rating| *rating != 0.0)
}
