use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use tracing::info;

use super::{MessageSender, Reply};
use crate::identity::BotIdentity;

/// Build a Telegram client whose HTTP requests give up after `timeout`.
pub fn build_bot(token: &str, timeout: Duration) -> Result<Bot> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(timeout)
        .build()
        .context("Failed to build Telegram HTTP client")?;
    Ok(Bot::with_client(token, client))
}

/// Ask Telegram who we are (`getMe`).
pub async fn fetch_identity(bot: &Bot) -> Result<BotIdentity> {
    let me = bot
        .get_me()
        .await
        .context("Failed to fetch bot identity from Telegram")?;
    let username = me
        .user
        .username
        .clone()
        .context("Telegram returned a bot account without a username")?;
    Ok(BotIdentity::new(me.user.first_name.clone(), username))
}

/// Point Telegram's update delivery at `endpoint`.
pub async fn register_webhook(bot: &Bot, endpoint: &str) -> Result<()> {
    let url = reqwest::Url::parse(endpoint)
        .with_context(|| format!("Invalid webhook URL: {}", endpoint))?;
    bot.set_webhook(url)
        .await
        .with_context(|| format!("Failed to register webhook {}", endpoint))?;
    info!("Webhook registered at {}", endpoint);
    Ok(())
}

/// Sends replies through the Bot API `sendMessage` method.
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, reply: &Reply) -> Result<()> {
        self.bot
            .send_message(ChatId(reply.chat_id), reply.text.clone())
            .reply_parameters(ReplyParameters::new(MessageId(reply.reply_to_message_id)))
            .await
            .context("sendMessage failed")?;
        Ok(())
    }
}
