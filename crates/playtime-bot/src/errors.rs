//! Discord API failure logging.
//!
//! Sending a reply or editing a page can fail on Discord's side. None of those
//! failures are retried; this module only decides how loudly to log them.

use serenity::http::HttpError;
use tracing::{error, warn};

/// How a failed Discord call should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Discord rejected the request (4xx): retrying the same call cannot help.
    Permanent,
    /// Rate limit, 5xx, or network trouble.
    Transient,
}

/// Classify an HTTP status returned by the Discord API.
pub fn classify_status(status: u16) -> Severity {
    match status {
        429 => Severity::Transient,
        400..=499 => Severity::Permanent,
        _ => Severity::Transient,
    }
}

/// Classify a serenity error.
pub fn classify(err: &serenity::Error) -> Severity {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => {
            classify_status(resp.status_code.as_u16())
        }
        serenity::Error::Model(_) => Severity::Permanent,
        _ => Severity::Transient,
    }
}

/// Log a failed Discord call at the level its severity calls for.
pub fn log_discord_error(context: &str, err: &serenity::Error) {
    match classify(err) {
        Severity::Permanent => error!("{}: {}", context, err),
        Severity::Transient => warn!("{}: {}", context, err),
    }
}
