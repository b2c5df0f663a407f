//! Text command routing
//!
//! `!<command> <args...>`: the first whitespace-separated token picks the
//! handler, the rest are positional arguments. Unknown commands are ignored
//! without a reply; each handler checks its own argument count.

#[path = "router_tests.rs"]
mod router_tests;

use std::sync::Arc;

use playtime_api::{Backend, Error as BackendError};
use playtime_types::{MessagePayload, QueryKind};
use tracing::{debug, info, warn};

use crate::interaction::fetch_result_set;
use crate::pagination::paginate;
use crate::render::{render_page, render_registration};
use crate::token::InteractionToken;

pub const COMMAND_PREFIX: char = '!';

pub const REGISTER_USAGE: &str = "Usage: `!register <steamid>`";
pub const GAMES_USAGE: &str = "Usage: `!games <username>`";
pub const SEARCH_USAGE: &str = "Usage: `!search <game name>`";
pub const KEY_TOO_LONG: &str = "That name is too long to page through.";

/// What the handler needs to know about a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub author_id: u64,
    /// Pre-formatted mention, e.g. `<@123>`
    pub author_mention: String,
    pub content: String,
}

/// What to send back to the channel
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Message(MessagePayload),
}

/// Split `!name arg1 arg2` into `("name", ["arg1", "arg2"])`.
///
/// `None` when the message is not a command at all.
pub fn parse_command(content: &str) -> Option<(&str, Vec<&str>)> {
    let rest = content.strip_prefix(COMMAND_PREFIX)?;
    // `! ping` names the empty command, which matches nothing.
    if rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?;
    Some((name, tokens.collect()))
}

/// Chat text for a failed backend call on the command path.
pub fn backend_error_reply(err: &BackendError) -> String {
    match err {
        BackendError::Status { body, .. } => format!("API error: {}", body),
        BackendError::Decode(msg) => format!("Error parsing JSON: {}", msg),
        BackendError::Transport(msg) => format!("Error calling API: {}", msg),
        BackendError::Config(msg) => format!("Error calling API: {}", msg),
    }
}

pub struct Router<B> {
    backend: Arc<B>,
}

impl<B: Backend> Router<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Route one message. `None` means stay silent.
    pub async fn dispatch(&self, bot_user_id: u64, msg: &IncomingMessage) -> Option<Reply> {
        if msg.author_id == bot_user_id {
            return None;
        }
        let (name, args) = parse_command(&msg.content)?;

        match name {
            "ping" => Some(Reply::Text(format!("Pong, {}!", msg.author_mention))),
            "register" => Some(self.register(&args).await),
            "games" | "user-lookup" => Some(self.games(&args).await),
            "search" => Some(self.search(&args).await),
            other => {
                debug!("Ignoring unknown command '{}'", other);
                None
            }
        }
    }

    async fn register(&self, args: &[&str]) -> Reply {
        let [steamid] = args else {
            return Reply::Text(REGISTER_USAGE.to_string());
        };

        match self.backend.register(steamid).await {
            Ok(account) => {
                info!("Registered steamid {}", account.steamid);
                Reply::Message(render_registration(&account))
            }
            Err(e) => {
                warn!("register {} failed: {}", steamid, e);
                Reply::Text(backend_error_reply(&e))
            }
        }
    }

    async fn games(&self, args: &[&str]) -> Reply {
        let [username] = args else {
            return Reply::Text(GAMES_USAGE.to_string());
        };
        self.first_page(QueryKind::UserLookup, username).await
    }

    async fn search(&self, args: &[&str]) -> Reply {
        if args.is_empty() {
            return Reply::Text(SEARCH_USAGE.to_string());
        }
        let query = args.join(" ");
        self.first_page(QueryKind::Search, &query).await
    }

    async fn first_page(&self, kind: QueryKind, key: &str) -> Reply {
        if !InteractionToken::fits(kind, key) {
            return Reply::Text(KEY_TOO_LONG.to_string());
        }

        let set = match fetch_result_set(&*self.backend, kind, key).await {
            Ok(set) => set,
            Err(e) => {
                warn!("{} '{}' failed: {}", kind, key, e);
                return Reply::Text(backend_error_reply(&e));
            }
        };

        if kind == QueryKind::Search && set.is_empty() {
            return Reply::Text(format!("No users found for **{}**", key));
        }

        let view = paginate(&set, 0);
        match render_page(kind, key, &view) {
            Ok(payload) => Reply::Message(payload),
            Err(e) => {
                warn!("Could not render {} '{}': {}", kind, key, e);
                Reply::Text(KEY_TOO_LONG.to_string())
            }
        }
    }
}
