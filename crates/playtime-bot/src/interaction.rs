//! Pagination button handling
//!
//! Nothing survives between presses: every click fetches the list again from
//! the backend and cuts the requested page from the fresh copy. The page a
//! user sees is only as stable as the backend's answer for the same key.

#[path = "interaction_tests.rs"]
mod interaction_tests;

use std::sync::Arc;

use playtime_api::Backend;
use playtime_types::{MessagePayload, QueryKind, ResultSet};
use tracing::{debug, warn};

use crate::pagination::paginate;
use crate::render::render_page;
use crate::token::InteractionToken;

/// Run the query `kind` names for `key` and build its sorted result set.
pub async fn fetch_result_set<B: Backend>(
    backend: &B,
    kind: QueryKind,
    key: &str,
) -> playtime_api::Result<ResultSet> {
    match kind {
        QueryKind::UserLookup => Ok(ResultSet::from_library(key, backend.user_lookup(key).await?)),
        QueryKind::Search => Ok(ResultSet::from_search(key, backend.search(key).await?)),
    }
}

/// Rebuilds paginated messages from button presses.
pub struct Paginator<B> {
    backend: Arc<B>,
}

impl<B: Backend> Paginator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The replacement message for a press on `custom_id`, or `None` when the
    /// press should be dropped and the current page left on screen.
    pub async fn handle_press(&self, custom_id: &str) -> Option<MessagePayload> {
        let token = match InteractionToken::decode(custom_id) {
            Ok(token) => token,
            Err(e) => {
                warn!("Dropping malformed navigation id '{}': {}", custom_id, e);
                return None;
            }
        };
        debug!("Navigation press: {}", token);

        let set = match fetch_result_set(&*self.backend, token.kind, &token.key).await {
            Ok(set) => set,
            Err(e) => {
                warn!("Re-fetch for {} failed, keeping current page: {}", token, e);
                return None;
            }
        };

        let view = paginate(&set, token.target_page());
        debug!(
            "Rendering {} '{}' page {}/{}",
            token.kind,
            token.key,
            view.page + 1,
            view.total_pages
        );

        match render_page(token.kind, &token.key, &view) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Could not render {}: {}", token, e);
                None
            }
        }
    }
}
