use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::WEBHOOK_PATH;
use crate::dispatch::CommandTable;
use crate::error::WebhookError;
use crate::identity::BotIdentity;
use crate::platform::{self, MessageSender, Update};

/// Everything a request handler needs, built once during bootstrap.
pub struct AppState {
    pub identity: BotIdentity,
    pub commands: CommandTable,
    pub sender: Arc<dyn MessageSender>,
    pub send_timeout: Duration,
}

impl AppState {
    pub fn new(
        identity: BotIdentity,
        commands: CommandTable,
        sender: Arc<dyn MessageSender>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            commands,
            sender,
            send_timeout,
        }
    }
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(rename = "botName")]
    bot_name: String,
    username: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(handle_webhook))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until Ctrl-C.
pub async fn serve(state: Arc<AppState>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Server listening on port {}", port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StatusResponse>, WebhookError> {
    let body = body.map_err(|e| WebhookError::UnreadableBody(e.body_text()))?;
    let update: Update = serde_json::from_slice(&body)?;
    debug!(update_id = ?update.update_id, "Webhook received update");

    if let Some(message) = &update.message {
        info!(
            "[{}] {}",
            message.sender_label(),
            message.text.as_deref().unwrap_or_default()
        );
    }

    // The caller gets its acknowledgement without waiting on delivery.
    if let Some(reply) = state.commands.dispatch(&update, &state.identity) {
        let sender = Arc::clone(&state.sender);
        let timeout = state.send_timeout;
        tokio::spawn(async move {
            platform::deliver(sender.as_ref(), &reply, timeout).await;
        });
    }

    Ok(Json(StatusResponse { status: "success" }))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        bot_name: state.identity.name.clone(),
        username: state.identity.username.clone(),
    })
}
