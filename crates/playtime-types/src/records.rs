//! Response schemas for the playtime backend
//!
//! One record per endpoint. Optional fields decode to empty strings so that
//! callers never have to distinguish "absent" from "blank"; any required field
//! that is missing or has the wrong type fails deserialization as a whole.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// `POST /register` → 201
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredAccount {
    pub steamid: String,
    pub profile_url: String,
    pub avatar_url: String,
}

/// `GET /user/<username>` → 200
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserLibrary {
    pub profile_url: String,
    pub avatar_url: String,
    /// Keyed by game name, in the order the backend sent them.
    pub games: IndexMap<String, GameRecord>,
}

/// One owned game inside a [`UserLibrary`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// Total playtime in minutes
    pub playtime_forever: u64,
    pub store_url: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub header_url: String,
}

/// `GET /search?game=<title>` → 200
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub img_icon_url: String,
    pub header_url: String,
    pub users: Vec<SearchUser>,
}

/// One registered user who owns the searched game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchUser {
    pub username: String,
    pub profile_url: String,
    /// Playtime for the searched game, in minutes
    pub playtime: u64,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub header_url: String,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
