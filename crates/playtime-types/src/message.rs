//! Platform-neutral outbound message payload
//!
//! Rendering produces these plain values; the bot turns them into serenity
//! builders right before talking to Discord, which keeps rendering testable.

use serde::{Deserialize, Serialize};

/// Embed footer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Embed image or thumbnail (just a URL)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedMedia {
    pub url: String,
}

impl EmbedMedia {
    /// `None` for an empty URL; Discord rejects blank media URLs.
    pub fn non_empty(url: &str) -> Option<Self> {
        if url.is_empty() {
            None
        } else {
            Some(Self {
                url: url.to_string(),
            })
        }
    }
}

/// Message embed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
}

/// Button style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
}

/// An interactive button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Button {
    pub style: ButtonStyle,
    pub label: String,
    /// Echoed back by Discord when the button is pressed
    pub custom_id: String,
    #[serde(default)]
    pub disabled: bool,
}

/// An action row; Discord allows up to 5 buttons per row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRow {
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// One embed plus its interactive controls
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePayload {
    pub embed: Embed,
    #[serde(default)]
    pub components: Vec<ActionRow>,
}
