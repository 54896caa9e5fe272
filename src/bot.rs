use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::dispatch::CommandTable;
use crate::platform::telegram::{self, TelegramSender};
use crate::server::{self, AppState};

/// Bootstrap the bot and serve webhook traffic.
///
/// Nothing is served until the configuration is valid, the bot identity is
/// known and the webhook is registered; any failure on the way is returned
/// before the listener is bound.
pub async fn run() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    info!("Configuration loaded successfully");
    info!("  Webhook: {}", config.webhook_endpoint());
    info!("  Port: {}", config.port);
    info!("  Send timeout: {:?}", config.send_timeout);

    let bot = telegram::build_bot(&config.bot_token, config.send_timeout)?;

    let identity = telegram::fetch_identity(&bot).await?;
    info!("Authorized as {} (@{})", identity.name, identity.username);

    telegram::register_webhook(&bot, &config.webhook_endpoint()).await?;

    let state = Arc::new(AppState::new(
        identity,
        CommandTable::default(),
        Arc::new(TelegramSender::new(bot)),
        config.send_timeout,
    ));

    info!("Bot is starting...");
    server::serve(state, config.port).await
}
