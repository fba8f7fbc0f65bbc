//! Platform a game is played on

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Gaming platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Pc,
    Console,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown platform: {0} (expected PC, Console or Mobile)")]
pub struct ParsePlatformError(pub String);

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Pc, Platform::Console, Platform::Mobile];

    /// External tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Console => "Console",
            Platform::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePlatformError(s.to_string()))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("pc".parse::<Platform>().unwrap(), Platform::Pc);
        assert_eq!("CONSOLE".parse::<Platform>().unwrap(), Platform::Console);
        assert_eq!(" Mobile ".parse::<Platform>().unwrap(), Platform::Mobile);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Switch".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("Switch"));
    }

    #[test]
    fn test_serde_tag() {
        assert_eq!(serde_json::to_string(&Platform::Pc).unwrap(), "\"PC\"");
        let parsed: Platform = serde_json::from_str("\"console\"").unwrap();
        assert_eq!(parsed, Platform::Console);
        assert!(serde_json::from_str::<Platform>("\"arcade\"").is_err());
    }
}
