use std::future::Future;

use playtime_types::{RegisteredAccount, SearchResult, UserLibrary};

use crate::error::Result;

/// The three backend queries the bot issues.
///
/// Implementations must return the same data for the same key on repeated
/// calls for pagination to stay coherent: page N of a list is rebuilt by
/// calling the same method again, never from a cached copy.
pub trait Backend: Send + Sync + 'static {
    /// `POST /register`; expects 201.
    fn register(&self, steamid: &str) -> impl Future<Output = Result<RegisteredAccount>> + Send;

    /// `GET /user/<username>`; expects 200.
    fn user_lookup(&self, username: &str) -> impl Future<Output = Result<UserLibrary>> + Send;

    /// `GET /search?game=<game>`; expects 200.
    fn search(&self, game: &str) -> impl Future<Output = Result<SearchResult>> + Send;
}
