mod bot;
mod config;
mod dispatch;
mod error;
mod identity;
mod platform;
mod server;

use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hookbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = bot::run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}
