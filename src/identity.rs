/// Who the bot is, as reported by the platform at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    /// Display name (Telegram `first_name`).
    pub name: String,
    /// Handle without the leading `@`.
    pub username: String,
}

impl BotIdentity {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }
}
