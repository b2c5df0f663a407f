//! Message rendering
//!
//! `render_*` functions are pure and produce [`MessagePayload`]s; the `to_*`
//! functions at the bottom turn those into serenity builders.

use playtime_types::{
    ActionRow, Button, ButtonStyle, Direction, Embed, EmbedFooter, EmbedMedia, MessagePayload,
    QueryKind, RegisteredAccount,
};
use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::ButtonStyle as DiscordButtonStyle;

use crate::pagination::PageView;
use crate::token::{InteractionToken, TokenError};

pub const EMBED_COLOUR: u32 = 0x33ccbb;

pub const PREV_LABEL: &str = "◀ Previous";
pub const NEXT_LABEL: &str = "Next ▶";

/// A list page with "previous"/"next" buttons that replay `kind` for `key`.
pub fn render_page(kind: QueryKind, key: &str, view: &PageView) -> Result<MessagePayload, TokenError> {
    let prev = InteractionToken::new(kind, Direction::Prev, key, view.page).encode()?;
    let next = InteractionToken::new(kind, Direction::Next, key, view.page).encode()?;

    let embed = Embed {
        title: Some(format!("{} — {}", view.title, view.page_label())),
        description: Some(view.body()),
        color: Some(EMBED_COLOUR),
        thumbnail: EmbedMedia::non_empty(&view.thumbnail_url),
        image: EmbedMedia::non_empty(&view.banner_url),
        footer: Some(EmbedFooter {
            text: view.total_label(),
        }),
        ..Default::default()
    };

    let row = ActionRow {
        buttons: vec![
            Button {
                style: ButtonStyle::Primary,
                label: PREV_LABEL.to_string(),
                custom_id: prev,
                disabled: view.prev_disabled(),
            },
            Button {
                style: ButtonStyle::Primary,
                label: NEXT_LABEL.to_string(),
                custom_id: next,
                disabled: view.next_disabled(),
            },
        ],
    };

    Ok(MessagePayload {
        embed,
        components: vec![row],
    })
}

/// Confirmation card for a newly registered account.
pub fn render_registration(account: &RegisteredAccount) -> MessagePayload {
    MessagePayload {
        embed: Embed {
            title: Some(account.steamid.clone()),
            url: Some(account.profile_url.clone()).filter(|u| !u.is_empty()),
            color: Some(EMBED_COLOUR),
            thumbnail: EmbedMedia::non_empty(&account.avatar_url),
            footer: Some(EmbedFooter {
                text: "Registration successful".to_string(),
            }),
            ..Default::default()
        },
        components: Vec::new(),
    }
}

pub fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(url) = &embed.url {
        builder = builder.url(url);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        builder = builder.thumbnail(&thumbnail.url);
    }
    if let Some(image) = &embed.image {
        builder = builder.image(&image.url);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(&footer.text));
    }
    builder
}

pub fn to_action_rows(rows: &[ActionRow]) -> Vec<CreateActionRow> {
    rows.iter()
        .map(|row| {
            CreateActionRow::Buttons(
                row.buttons
                    .iter()
                    .map(|button| {
                        CreateButton::new(&button.custom_id)
                            .label(&button.label)
                            .style(match button.style {
                                ButtonStyle::Primary => DiscordButtonStyle::Primary,
                            })
                            .disabled(button.disabled)
                    })
                    .collect(),
            )
        })
        .collect()
}

/// A new channel message.
pub fn to_create_message(payload: &MessagePayload) -> CreateMessage {
    let mut message = CreateMessage::new().embed(to_create_embed(&payload.embed));
    if !payload.components.is_empty() {
        message = message.components(to_action_rows(&payload.components));
    }
    message
}

/// Replace the embed and buttons of the message a component belongs to.
pub fn to_update_response(payload: &MessagePayload) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(to_create_embed(&payload.embed))
            .components(to_action_rows(&payload.components)),
    )
}

/// Response to a button press: the new page, or a bare acknowledgement that
/// leaves the message as it is when the press was dropped.
pub fn to_press_response(payload: Option<&MessagePayload>) -> CreateInteractionResponse {
    match payload {
        Some(payload) => to_update_response(payload),
        None => CreateInteractionResponse::Acknowledge,
    }
}
