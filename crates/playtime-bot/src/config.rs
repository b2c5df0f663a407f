//! Configuration management for playtime-bot

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use playtime_api::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment lookup, swapped for an in-memory map in tests
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordBotConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Discord bot specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordBotConfig {
    /// Bot token from the Discord developer portal
    #[serde(default)]
    pub bot_token: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&SystemEnv)
    }

    /// Load configuration from environment variables
    pub fn from_env_with<E: ReadEnv>(env: &E) -> Result<Self> {
        let bot_token = env
            .var("DISCORD_BOT_TOKEN")
            .context("DISCORD_BOT_TOKEN not set")?;

        let mut backend = BackendConfig::default();
        if let Some(url) = env.var("PLAYTIME_API_URL") {
            backend.base_url = url;
        }
        if let Some(raw) = env.var("PLAYTIME_API_TIMEOUT_SECS") {
            backend.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("PLAYTIME_API_TIMEOUT_SECS is not a number: {}", raw))?;
        }

        Ok(Config {
            discord: DiscordBotConfig { bot_token },
            backend,
        })
    }

    /// Reject configurations the bot cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.discord.bot_token.trim().is_empty() {
            bail!("Discord bot token is empty; set DISCORD_BOT_TOKEN or [discord] bot_token");
        }
        if self.backend.timeout_secs == 0 {
            bail!("Backend timeout must be at least one second");
        }
        Ok(())
    }
}
