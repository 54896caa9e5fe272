use std::time::Duration;

use thiserror::Error;

pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";
pub const PORT_VAR: &str = "PORT";
pub const SEND_TIMEOUT_VAR: &str = "SEND_TIMEOUT_SECS";

/// Route the platform posts updates to, appended to the public base URL.
pub const WEBHOOK_PATH: &str = "/webhook";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Public base URL, without a trailing slash.
    pub webhook_url: String,
    pub port: u16,
    pub send_timeout: Duration,
}

fn default_port() -> u16 {
    8080
}

fn default_send_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values are
    /// treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let webhook_url = get(WEBHOOK_URL_VAR)
            .ok_or(ConfigError::Missing(WEBHOOK_URL_VAR))?
            .trim_end_matches('/')
            .to_string();

        let port = match get(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => default_port(),
        };

        let send_timeout = match get(SEND_TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        name: SEND_TIMEOUT_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: SEND_TIMEOUT_VAR,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })
                }
            },
            None => default_send_timeout(),
        };

        Ok(Self {
            bot_token,
            webhook_url,
            port,
            send_timeout,
        })
    }

    /// Full URL registered with the platform.
    pub fn webhook_endpoint(&self) -> String {
        format!("{}{}", self.webhook_url, WEBHOOK_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = load(&[
            (TOKEN_VAR, "123:abc"),
            (WEBHOOK_URL_VAR, "https://bot.example.com"),
        ])
        .unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.port, 8080);
        assert_eq!(config.send_timeout, Duration::from_secs(10));
        assert_eq!(
            config.webhook_endpoint(),
            "https://bot.example.com/webhook"
        );
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = load(&[(WEBHOOK_URL_VAR, "https://bot.example.com")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing(TOKEN_VAR));
    }

    #[test]
    fn test_blank_webhook_url_counts_as_missing() {
        let err = load(&[(TOKEN_VAR, "t"), (WEBHOOK_URL_VAR, "   ")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing(WEBHOOK_URL_VAR));
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = load(&[(TOKEN_VAR, "t"), (WEBHOOK_URL_VAR, "https://h.io/bot/")]).unwrap();
        assert_eq!(config.webhook_endpoint(), "https://h.io/bot/webhook");
    }

    #[test]
    fn test_port_override_and_invalid_port() {
        let config = load(&[
            (TOKEN_VAR, "t"),
            (WEBHOOK_URL_VAR, "https://h.io"),
            (PORT_VAR, "3000"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);

        let err = load(&[
            (TOKEN_VAR, "t"),
            (WEBHOOK_URL_VAR, "https://h.io"),
            (PORT_VAR, "http"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: PORT_VAR, .. }));
    }

    #[test]
    fn test_zero_send_timeout_rejected() {
        let err = load(&[
            (TOKEN_VAR, "t"),
            (WEBHOOK_URL_VAR, "https://h.io"),
            (SEND_TIMEOUT_VAR, "0"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_non_numeric_send_timeout_rejected() {
        let err = load(&[
            (TOKEN_VAR, "t"),
            (WEBHOOK_URL_VAR, "https://h.io"),
            (SEND_TIMEOUT_VAR, "ten"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: SEND_TIMEOUT_VAR,
                value: "ten".to_string(),
                reason: "invalid digit found in string".to_string(),
            }
        );
    }
}
