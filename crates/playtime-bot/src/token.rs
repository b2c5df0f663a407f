//! Navigation identifiers carried by pagination buttons
//!
//! A button's `custom_id` is the only state a paginated message keeps:
//! `<kind>|<prev|next>|<key>|<page>`. Discord hands it back verbatim on every
//! press, which is enough to replay the query that built the list.
//!
//! The key is user input (a username or a game title), so `%` and `|` inside
//! it are escaped as `%25` and `%7C` before joining.

use std::fmt;

use playtime_types::{Direction, QueryKind};
use thiserror::Error;

pub const DELIMITER: char = '|';

/// Discord's limit on component `custom_id` length, in characters.
pub const MAX_CUSTOM_ID_LEN: usize = 100;

/// Page digits reserved when checking up front whether a key will fit.
const RESERVED_PAGE_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("unknown query kind '{0}'")]
    UnknownKind(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("invalid page index '{0}'")]
    InvalidPage(String),

    #[error("invalid escape sequence in key '{0}'")]
    InvalidEscape(String),

    #[error("identifier is {0} characters long, limit is {MAX_CUSTOM_ID_LEN}")]
    TooLong(usize),
}

/// Decoded navigation identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionToken {
    pub kind: QueryKind,
    pub direction: Direction,
    /// Query key exactly as the user typed it
    pub key: String,
    /// Page the message was showing when the button was rendered
    pub page: usize,
}

impl InteractionToken {
    pub fn new(kind: QueryKind, direction: Direction, key: impl Into<String>, page: usize) -> Self {
        Self {
            kind,
            direction,
            key: key.into(),
            page,
        }
    }

    /// Serialise into a `custom_id`, failing if Discord would reject it.
    pub fn encode(&self) -> Result<String, TokenError> {
        let id = format!(
            "{}{d}{}{d}{}{d}{}",
            self.kind,
            self.direction,
            escape_key(&self.key),
            self.page,
            d = DELIMITER
        );
        let len = id.chars().count();
        if len > MAX_CUSTOM_ID_LEN {
            return Err(TokenError::TooLong(len));
        }
        Ok(id)
    }

    pub fn decode(custom_id: &str) -> Result<Self, TokenError> {
        let fields: Vec<&str> = custom_id.split(DELIMITER).collect();
        let [kind, direction, key, page] = fields[..] else {
            return Err(TokenError::FieldCount(fields.len()));
        };

        let kind = kind
            .parse::<QueryKind>()
            .map_err(|_| TokenError::UnknownKind(kind.to_string()))?;
        let direction = direction
            .parse::<Direction>()
            .map_err(|_| TokenError::UnknownDirection(direction.to_string()))?;
        let page = page
            .parse::<usize>()
            .map_err(|_| TokenError::InvalidPage(page.to_string()))?;
        let key = unescape_key(key)?;

        Ok(Self {
            kind,
            direction,
            key,
            page,
        })
    }

    /// Page index this press asks for, before clamping.
    pub fn target_page(&self) -> i64 {
        self.page as i64 + self.direction.step()
    }

    /// Whether buttons for `key` stay under the `custom_id` limit for any
    /// realistic page index.
    pub fn fits(kind: QueryKind, key: &str) -> bool {
        let fixed = kind.as_str().len() + Direction::Next.as_str().len() + 3;
        fixed + escape_key(key).chars().count() + RESERVED_PAGE_DIGITS <= MAX_CUSTOM_ID_LEN
    }
}

impl fmt::Display for InteractionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} '{}' from page {}",
            self.kind, self.direction, self.key, self.page
        )
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '%' => out.push_str("%25"),
            DELIMITER => out.push_str("%7C"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_key(escaped: &str) -> Result<String, TokenError> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut code = String::with_capacity(2);
        code.extend(chars.by_ref().take(2));
        match code.as_str() {
            "25" => out.push('%'),
            "7C" | "7c" => out.push(DELIMITER),
            _ => return Err(TokenError::InvalidEscape(escaped.to_string())),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_key() {
        let token = InteractionToken::new(QueryKind::UserLookup, Direction::Next, "alice", 0);
        assert_eq!(token.encode().unwrap(), "games|next|alice|0");
    }

    #[test]
    fn test_decode_plain_key() {
        let token = InteractionToken::decode("search|prev|Portal 2|3").unwrap();
        assert_eq!(
            token,
            InteractionToken::new(QueryKind::Search, Direction::Prev, "Portal 2", 3)
        );
    }

    #[test]
    fn test_round_trip_keys() {
        let keys = [
            "alice",
            "Half-Life 2: Episode One",
            "100% Orange Juice",
            "a|b",
            "||",
            "%7C literal",
            "%",
            "東方",
            "",
        ];
        for key in keys {
            for direction in [Direction::Prev, Direction::Next] {
                for kind in [QueryKind::UserLookup, QueryKind::Search] {
                    let token = InteractionToken::new(kind, direction, key, 42);
                    let id = token.encode().unwrap();
                    assert_eq!(id.matches(DELIMITER).count(), 3, "id {}", id);
                    assert_eq!(InteractionToken::decode(&id).unwrap(), token, "key {:?}", key);
                }
            }
        }
    }

    #[test]
    fn test_delimiter_in_key_is_escaped() {
        let token = InteractionToken::new(QueryKind::Search, Direction::Next, "Rock|Paper", 1);
        assert_eq!(token.encode().unwrap(), "search|next|Rock%7CPaper|1");
    }

    #[test]
    fn test_decode_missing_field() {
        assert_eq!(
            InteractionToken::decode("games|next|alice"),
            Err(TokenError::FieldCount(3))
        );
        assert_eq!(InteractionToken::decode(""), Err(TokenError::FieldCount(1)));
    }

    #[test]
    fn test_decode_extra_field() {
        assert_eq!(
            InteractionToken::decode("games|next|a|b|0"),
            Err(TokenError::FieldCount(5))
        );
    }

    #[test]
    fn test_decode_bad_fields() {
        assert!(matches!(
            InteractionToken::decode("library|next|alice|0"),
            Err(TokenError::UnknownKind(_))
        ));
        assert!(matches!(
            InteractionToken::decode("games|forward|alice|0"),
            Err(TokenError::UnknownDirection(_))
        ));
        assert!(matches!(
            InteractionToken::decode("games|next|alice|-1"),
            Err(TokenError::InvalidPage(_))
        ));
        assert!(matches!(
            InteractionToken::decode("games|next|alice|one"),
            Err(TokenError::InvalidPage(_))
        ));
        assert!(matches!(
            InteractionToken::decode("games|next|50%|0"),
            Err(TokenError::InvalidEscape(_))
        ));
        assert!(matches!(
            InteractionToken::decode("games|next|%41|0"),
            Err(TokenError::InvalidEscape(_))
        ));
    }

    #[test]
    fn test_target_page() {
        let next = InteractionToken::new(QueryKind::Search, Direction::Next, "x", 1);
        let prev = InteractionToken::new(QueryKind::Search, Direction::Prev, "x", 0);
        assert_eq!(next.target_page(), 2);
        assert_eq!(prev.target_page(), -1);
    }

    #[test]
    fn test_encode_rejects_long_key() {
        let token = InteractionToken::new(QueryKind::Search, Direction::Next, "x".repeat(95), 0);
        assert!(matches!(token.encode(), Err(TokenError::TooLong(_))));
    }

    #[test]
    fn test_fits_matches_encode() {
        let longest = "k".repeat(MAX_CUSTOM_ID_LEN - "search|next||".len() - 6);
        assert!(InteractionToken::fits(QueryKind::Search, &longest));
        assert!(InteractionToken::new(QueryKind::Search, Direction::Prev, longest.clone(), 999_999)
            .encode()
            .is_ok());

        let too_long = format!("{}k", longest);
        assert!(!InteractionToken::fits(QueryKind::Search, &too_long));
    }

    #[test]
    fn test_fits_counts_escapes() {
        // Each '|' costs three characters once escaped.
        let pipes = "|".repeat(28);
        assert!(!InteractionToken::fits(QueryKind::Search, &pipes));
        assert!(InteractionToken::fits(QueryKind::Search, &"a".repeat(28)));
    }

    #[test]
    fn test_display() {
        let token = InteractionToken::new(QueryKind::UserLookup, Direction::Prev, "bob", 4);
        assert_eq!(token.to_string(), "games prev 'bob' from page 4");
    }
}
