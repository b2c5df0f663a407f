//! Listable entries and the result sets that hold them

use crate::records::{SearchResult, UserLibrary};

/// One row in a paginated list: a game in a library, or a user in a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub url: String,
    /// Duration in minutes
    pub minutes: u64,
    /// Banner image; empty when the backend had none.
    pub banner_url: String,
}

/// Everything one backend query returned, ready to be paged through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub title: String,
    pub thumbnail_url: String,
    pub entries: Vec<Entry>,
}

impl ResultSet {
    pub fn new(title: impl Into<String>, thumbnail_url: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            title: title.into(),
            thumbnail_url: thumbnail_url.into(),
            entries,
        }
    }

    /// A user's library, titled with the username and shown with their avatar.
    pub fn from_library(username: &str, library: UserLibrary) -> Self {
        let entries = library
            .games
            .into_iter()
            .map(|(name, game)| Entry {
                name,
                url: game.store_url,
                minutes: game.playtime_forever,
                banner_url: game.header_url,
            })
            .collect();
        let mut set = Self::new(username, library.avatar_url, entries);
        set.sort_by_duration();
        set
    }

    /// Owners of a game. Users without their own banner fall back to the
    /// game's header art.
    pub fn from_search(query: &str, result: SearchResult) -> Self {
        let header_url = result.header_url;
        let entries = result
            .users
            .into_iter()
            .map(|user| Entry {
                name: user.username,
                url: user.profile_url,
                minutes: user.playtime,
                banner_url: if user.header_url.is_empty() {
                    header_url.clone()
                } else {
                    user.header_url
                },
            })
            .collect();
        let mut set = Self::new(query, result.img_icon_url, entries);
        set.sort_by_duration();
        set
    }

    /// Longest first. `sort_by` is stable, so equal durations keep the order
    /// the backend returned them in.
    pub fn sort_by_duration(&mut self) {
        self.entries.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
