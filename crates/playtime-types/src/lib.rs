//! Shared types for the playtime Discord bot
//!
//! Backend response schemas, the listable [`Entry`]/[`ResultSet`] model the
//! bot pages through, and a platform-neutral message payload that the bot
//! converts into Discord builders at the edge.

pub mod entry;
pub mod message;
pub mod query;
pub mod records;

pub use entry::{Entry, ResultSet};
pub use message::{ActionRow, Button, ButtonStyle, Embed, EmbedFooter, EmbedMedia, MessagePayload};
pub use query::{Direction, QueryKind};
pub use records::{GameRecord, RegisteredAccount, SearchResult, SearchUser, UserLibrary};
