//! In-memory [`Backend`] for unit testing without a running backend.
//!
//! Enabled with the `test-support` feature:
//!
//! ```toml
//! [dev-dependencies]
//! playtime-api = { path = "...", features = ["test-support"] }
//! ```
//!
//! Unknown keys answer like the real backend does for an unknown user or
//! game: a 404 status error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use playtime_types::{RegisteredAccount, SearchResult, UserLibrary};

use crate::backend::Backend;
use crate::error::{Error, Result};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Register(String),
    UserLookup(String),
    Search(String),
}

#[derive(Default)]
struct MockState {
    registrations: HashMap<String, Result<RegisteredAccount>>,
    libraries: HashMap<String, Result<UserLibrary>>,
    searches: HashMap<String, Result<SearchResult>>,
    calls: Vec<BackendCall>,
}

/// Canned responses keyed by the query argument, plus a log of every call.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registration(self, steamid: &str, response: Result<RegisteredAccount>) -> Self {
        self.state
            .lock()
            .unwrap()
            .registrations
            .insert(steamid.to_string(), response);
        self
    }

    pub fn with_library(self, username: &str, response: Result<UserLibrary>) -> Self {
        self.set_library(username, response);
        self
    }

    pub fn with_search(self, game: &str, response: Result<SearchResult>) -> Self {
        self.set_search(game, response);
        self
    }

    /// Replace a library after construction, e.g. to fail a later re-fetch.
    pub fn set_library(&self, username: &str, response: Result<UserLibrary>) {
        self.state
            .lock()
            .unwrap()
            .libraries
            .insert(username.to_string(), response);
    }

    pub fn set_search(&self, game: &str, response: Result<SearchResult>) {
        self.state
            .lock()
            .unwrap()
            .searches
            .insert(game.to_string(), response);
    }

    /// Snapshot of every call made so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

fn not_found(what: &str, key: &str) -> Error {
    Error::Status {
        status: 404,
        body: format!(r#"{{"error":"{} '{}' not found"}}"#, what, key),
    }
}

impl Backend for MockBackend {
    async fn register(&self, steamid: &str) -> Result<RegisteredAccount> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::Register(steamid.to_string()));
        state
            .registrations
            .get(steamid)
            .cloned()
            .unwrap_or_else(|| Err(not_found("steamid", steamid)))
    }

    async fn user_lookup(&self, username: &str) -> Result<UserLibrary> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::UserLookup(username.to_string()));
        state
            .libraries
            .get(username)
            .cloned()
            .unwrap_or_else(|| Err(not_found("user", username)))
    }

    async fn search(&self, game: &str) -> Result<SearchResult> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::Search(game.to_string()));
        state
            .searches
            .get(game)
            .cloned()
            .unwrap_or_else(|| Err(not_found("game", game)))
    }
}
