//! Environment-based configuration
//!
//! All settings come from environment variables (optionally via a `.env`
//! file loaded by the binary before this runs).

use anyhow::{Context, Result};

/// Default path for the persisted reminder stream.
pub const DEFAULT_SAVE_FILE: &str = "saved_reminders.jsonl";

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required).
    pub discord_token: String,
    /// Log filter passed to env_logger (e.g. "info", "remindme=debug").
    pub log_level: String,
    /// Path where pending reminders are saved on shutdown.
    pub save_file: String,
    /// Message prefixes the bot responds to; the first one is shown in help.
    pub command_prefixes: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DISCORD_TOKEN` is required; everything else has a default:
    /// `LOG_LEVEL` (info), `SAVE_FILE` (saved_reminders.jsonl),
    /// `COMMAND_PREFIXES` (comma-separated, "rm,remind").
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable is required")?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let save_file =
            std::env::var("SAVE_FILE").unwrap_or_else(|_| DEFAULT_SAVE_FILE.to_string());

        let command_prefixes = std::env::var("COMMAND_PREFIXES")
            .unwrap_or_else(|_| "rm,remind".to_string())
            .split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();

        if command_prefixes.is_empty() {
            anyhow::bail!("COMMAND_PREFIXES must contain at least one prefix");
        }

        Ok(Config {
            discord_token,
            log_level,
            save_file,
            command_prefixes,
        })
    }
}
