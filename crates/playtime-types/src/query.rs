//! Query kinds and navigation directions carried by pagination controls

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which backend query produced a paginated list.
///
/// The wire names are what appear in navigation identifiers, so they must stay
/// stable for as long as old messages with buttons exist on Discord.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// `GET /user/<username>`: one user's game library.
    #[serde(rename = "games")]
    UserLookup,
    /// `GET /search?game=<title>`: every registered user who owns a game.
    #[serde(rename = "search")]
    Search,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserLookup => "games",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "games" => Ok(Self::UserLookup),
            "search" => Ok(Self::Search),
            _ => Err(()),
        }
    }
}

/// Navigation button direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }

    /// Page offset applied before clamping.
    pub fn step(&self) -> i64 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            _ => Err(()),
        }
    }
}
