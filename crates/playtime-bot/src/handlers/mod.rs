//! Serenity event handler implementation

use playtime_api::Backend;
use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::mention::Mentionable;
use serenity::prelude::*;
use tracing::{debug, info};

use crate::errors::log_discord_error;
use crate::health::HealthState;
use crate::interaction::Paginator;
use crate::render::{to_create_message, to_press_response};
use crate::router::{IncomingMessage, Reply, Router};

/// Owns everything an event needs; serenity shares it across shards.
pub struct Handler<B> {
    router: Router<B>,
    paginator: Paginator<B>,
    health: HealthState,
}

impl<B: Backend> Handler<B> {
    pub fn new(router: Router<B>, paginator: Paginator<B>, health: HealthState) -> Self {
        Self {
            router,
            paginator,
            health,
        }
    }
}

#[async_trait]
impl<B: Backend> EventHandler for Handler<B> {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {} in {} guild(s)",
            ready.user.name,
            ready.guilds.len()
        );
        self.health.set_bot_username(ready.user.name.clone()).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let bot_user_id = ctx.cache.current_user().id.get();
        let incoming = IncomingMessage {
            author_id: msg.author.id.get(),
            author_mention: msg.author.mention().to_string(),
            content: msg.content.clone(),
        };

        let Some(reply) = self.router.dispatch(bot_user_id, &incoming).await else {
            return;
        };

        let sent = match reply {
            Reply::Text(text) => msg.channel_id.say(&ctx.http, text).await,
            Reply::Message(payload) => {
                msg.channel_id
                    .send_message(&ctx.http, to_create_message(&payload))
                    .await
            }
        };
        if let Err(e) = sent {
            log_discord_error(
                &format!("Failed to reply in channel {}", msg.channel_id),
                &e,
            );
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        // Slash commands, modals and autocomplete are not used.
        let Interaction::Component(component) = interaction else {
            return;
        };
        debug!(
            "Component press '{}' on message {}",
            component.data.custom_id, component.message.id
        );

        // A dropped press is still acknowledged so the client shows no error;
        // the message keeps its current page.
        let payload = self.paginator.handle_press(&component.data.custom_id).await;
        let context = match payload {
            Some(_) => "Failed to update message",
            None => "Failed to acknowledge press on message",
        };

        if let Err(e) = component
            .create_response(&ctx.http, to_press_response(payload.as_ref()))
            .await
        {
            log_discord_error(&format!("{} {}", context, component.message.id), &e);
        }
    }
}
