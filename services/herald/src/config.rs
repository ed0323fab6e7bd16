//! Configuration types for the herald service

use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::Path;

/// Environment variable holding the review API OAuth token
pub const API_TOKEN_ENV: &str = "REVIEW_API_TOKEN";
/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the Telegram chat identifier
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Review status API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Status endpoint URL
    #[serde(default)]
    pub endpoint: String,
    /// OAuth token, usually supplied via REVIEW_API_TOKEN
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Start the cursor at zero so the first poll returns the full history
    #[serde(default)]
    pub backfill: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: String::new(),
            poll_interval_seconds: default_poll_interval(),
            backfill: false,
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token, usually supplied via TELEGRAM_BOT_TOKEN
    #[serde(default)]
    pub bot_token: String,
    /// Chat identifier, usually supplied via TELEGRAM_CHAT_ID
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
        }
    }
}

fn default_poll_interval() -> u64 {
    600
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

impl Config {
    /// Overlay credentials from the environment over file-provided values
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        for (name, slot) in [
            (API_TOKEN_ENV, &mut self.api.token),
            (BOT_TOKEN_ENV, &mut self.telegram.bot_token),
            (CHAT_ID_ENV, &mut self.telegram.chat_id),
        ] {
            match std::env::var(name) {
                Ok(value) => *slot = value,
                Err(VarError::NotPresent) => {}
                Err(VarError::NotUnicode(_)) => {
                    return Err(crate::HeraldError::Config(format!(
                        "Environment variable {} is not valid unicode",
                        name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Startup precondition: the endpoint and every credential must be set
    pub fn validate(&self) -> crate::Result<()> {
        let mut missing = Vec::new();
        if self.api.endpoint.is_empty() {
            missing.push("api.endpoint".to_string());
        }
        if self.api.token.is_empty() {
            missing.push(format!("api.token ({})", API_TOKEN_ENV));
        }
        if self.telegram.bot_token.is_empty() {
            missing.push(format!("telegram.bot_token ({})", BOT_TOKEN_ENV));
        }
        if self.telegram.chat_id.is_empty() {
            missing.push(format!("telegram.chat_id ({})", CHAT_ID_ENV));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::HeraldError::Config(format!(
                "Missing required settings: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HeraldError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
