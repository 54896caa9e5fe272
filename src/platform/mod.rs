pub mod telegram;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

/// An update posted to the webhook by the platform.
///
/// Only the fields the bot acts on are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: Option<i64>,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat: Chat,
    pub from: Option<Sender>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl IncomingMessage {
    /// Best available label for the author, for logs.
    pub fn sender_label(&self) -> &str {
        self.from
            .as_ref()
            .and_then(|u| u.username.as_deref().or(u.first_name.as_deref()))
            .unwrap_or("unknown")
    }
}

/// A message to post back into a chat, threaded under the message it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: i64,
    pub text: String,
    pub reply_to_message_id: i32,
}

/// Delivers replies to the chat platform.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, reply: &Reply) -> Result<()>;
}

/// Best-effort delivery: the send is bounded by `timeout` and any failure is
/// logged and swallowed. Returns whether the platform accepted the reply.
pub async fn deliver(sender: &dyn MessageSender, reply: &Reply, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, sender.send(reply)).await {
        Ok(Ok(())) => {
            debug!(
                "Reply delivered to chat {} (reply to {})",
                reply.chat_id, reply.reply_to_message_id
            );
            true
        }
        Ok(Err(e)) => {
            error!("Failed to send reply to chat {}: {:#}", reply.chat_id, e);
            false
        }
        Err(_) => {
            error!(
                "Sending reply to chat {} timed out after {:?}",
                reply.chat_id, timeout
            );
            false
        }
    }
}
