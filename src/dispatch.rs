//! Command matching: maps an inbound update to the reply the bot should send.
//!
//! Commands live in a [`CommandTable`] rather than in the dispatch logic, so
//! registering a new one never touches [`CommandTable::dispatch`].

use tracing::debug;

use crate::identity::BotIdentity;
use crate::platform::{Reply, Update};

pub const WELCOME_TEXT: &str = "Welcome! I'm a Telegram bot served over an axum webhook.";
pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Send /help to see the available commands.";

/// Produces the reply text for a command.
pub type ReplyFn = fn(&CommandTable, &BotIdentity) -> String;

pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    reply: ReplyFn,
}

pub struct CommandTable {
    commands: Vec<Command>,
    fallback: ReplyFn,
}

impl CommandTable {
    /// An empty table that answers everything with `fallback`.
    pub fn new(fallback: ReplyFn) -> Self {
        Self {
            commands: Vec::new(),
            fallback,
        }
    }

    /// Register `name`. A later registration of the same name replaces the
    /// earlier one but keeps its position in the help listing.
    pub fn register(mut self, name: &'static str, description: &'static str, reply: ReplyFn) -> Self {
        let command = Command {
            name,
            description,
            reply,
        };
        match self.commands.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Reply text for a message. Matching is exact and case-sensitive after
    /// trimming surrounding whitespace.
    pub fn reply_text(&self, text: &str, identity: &BotIdentity) -> String {
        let text = text.trim();
        let reply = self
            .commands
            .iter()
            .find(|c| c.name == text)
            .map(|c| c.reply)
            .unwrap_or(self.fallback);
        reply(self, identity)
    }

    /// Decide the reply for `update`. Only updates without a message produce
    /// nothing; a message without text is answered like any unknown command.
    pub fn dispatch(&self, update: &Update, identity: &BotIdentity) -> Option<Reply> {
        let Some(message) = update.message.as_ref() else {
            debug!(update_id = ?update.update_id, "Ignoring update without message");
            return None;
        };
        let text = message.text.as_deref().unwrap_or_default();

        Some(Reply {
            chat_id: message.chat.id,
            text: self.reply_text(text, identity),
            reply_to_message_id: message.message_id,
        })
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        CommandTable::new(unknown_reply)
            .register("/start", "Start", start_reply)
            .register("/help", "Help", help_reply)
            .register("/info", "Bot info", info_reply)
    }
}

fn start_reply(_: &CommandTable, _: &BotIdentity) -> String {
    WELCOME_TEXT.to_string()
}

fn help_reply(table: &CommandTable, _: &BotIdentity) -> String {
    let mut text = String::from("Available commands:");
    for command in table.commands() {
        text.push_str(&format!("\n{} - {}", command.name, command.description));
    }
    text
}

fn info_reply(_: &CommandTable, identity: &BotIdentity) -> String {
    format!("Bot name: {}\nUsername: {}", identity.name, identity.username)
}

fn unknown_reply(_: &CommandTable, _: &BotIdentity) -> String {
    UNKNOWN_COMMAND_TEXT.to_string()
}
