//! The four-valued season selector.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Season under which a route is planned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Season {
    #[default]
    Summer,
    Fall,
    Winter,
    Spring,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Summer, Season::Fall, Season::Winter, Season::Spring];

    pub const fn as_str(self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::Spring => "spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ConfigError;

    /// Parse a season name. Matching is exact: the selector accepts the four
    /// lowercase names and nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSeason(s.to_owned()))
    }
}
