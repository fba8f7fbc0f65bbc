//! Play-progress status of a game

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle stage of a game
///
/// Any status may follow any other. The only guard lives in
/// [`Game::set_status`](crate::Game::set_status), which refuses to finish a
/// game with less than one hour played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Playing,
    Finished,
    Abandoned,
}

impl GameStatus {
    /// Every status, in lifecycle order
    pub const ALL: [GameStatus; 4] = [
        GameStatus::NotStarted,
        GameStatus::Playing,
        GameStatus::Finished,
        GameStatus::Abandoned,
    ];

    /// Stable identifier used on the command line and in lookups
    pub fn name(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "NOT_STARTED",
            GameStatus::Playing => "PLAYING",
            GameStatus::Finished => "FINISHED",
            GameStatus::Abandoned => "ABANDONED",
        }
    }

    /// Human readable label, also the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "Not Started",
            GameStatus::Playing => "Playing",
            GameStatus::Finished => "Finished",
            GameStatus::Abandoned => "Abandoned",
        }
    }

    /// Look up a status by internal name or display label.
    ///
    /// Unknown input falls back to [`GameStatus::NotStarted`].
    pub fn from_name_or_label(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| value == status.name() || value == status.label())
            .unwrap_or_else(|| {
                tracing::warn!("Unknown status '{}', using {}", value, GameStatus::NotStarted);
                GameStatus::NotStarted
            })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for GameStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for GameStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_name_or_label(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_label() {
        for status in GameStatus::ALL {
            assert_eq!(GameStatus::from_name_or_label(status.name()), status);
            assert_eq!(GameStatus::from_name_or_label(status.label()), status);
        }
    }

    #[test]
    fn test_unknown_falls_back_to_not_started() {
        assert_eq!(GameStatus::from_name_or_label(""), GameStatus::NotStarted);
        assert_eq!(GameStatus::from_name_or_label("finished"), GameStatus::NotStarted);
        assert_eq!(GameStatus::from_name_or_label("DONE"), GameStatus::NotStarted);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(GameStatus::NotStarted.to_string(), "Not Started");
        assert_eq!(GameStatus::Abandoned.to_string(), "Abandoned");
    }

    #[test]
    fn test_serde_label() {
        let json = serde_json::to_string(&GameStatus::Finished).unwrap();
        assert_eq!(json, "\"Finished\"");

        let parsed: GameStatus = serde_json::from_str("\"PLAYING\"").unwrap();
        assert_eq!(parsed, GameStatus::Playing);

        let parsed: GameStatus = serde_json::from_str("\"???\"").unwrap();
        assert_eq!(parsed, GameStatus::NotStarted);
    }
}
