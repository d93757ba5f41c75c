use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::access::ChannelSet;
use crate::database::DatabaseConnection;
use crate::errors::ConfigError;

// Application configuration module
// Settings are resolved once at startup from command line flags or their
// environment variables (see `main.rs`).

pub const ENV_TOKEN: &str = "VOCABACOV_TOKEN";
pub const ENV_CHANNELS: &str = "VOCABACOV_CHANNELS";
pub const ENV_DEBUG: &str = "VOCABACOV_DEBUG";
pub const ENV_TIMEOUT: &str = "VOCABACOV_TIMEOUT";
pub const ENV_DB_PATH: &str = "VOCABACOV_DB_PATH";

/// Long-poll timeout used when none (or zero, or garbage) is configured
pub const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Unvalidated settings as they arrive from flags and environment
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub token: Option<String>,
    pub channels: Option<String>,
    pub debug: bool,
    /// Seconds as typed; parsed only when the bot starts
    pub timeout: Option<String>,
    pub db_path: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Validated bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// Chats the bot serves
    pub channels: ChannelSet,
    /// Verbose logging, including transport requests
    pub debug: bool,
    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u32,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Effective log level
    pub log_level: LogLevel,
}

impl BotConfig {
    /// Validate raw settings; fails on a missing token or a missing/invalid channel list
    pub fn resolve(raw: RawSettings) -> Result<Self, ConfigError> {
        let token = raw
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken(ENV_TOKEN))?;

        let channels = raw
            .channels
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::MissingChannelList(ENV_CHANNELS))?;
        let channels = ChannelSet::parse(&channels)?;

        let poll_timeout_secs = raw
            .timeout
            .as_deref()
            .map_or(DEFAULT_POLL_TIMEOUT_SECS, parse_timeout);

        let db_path = resolve_db_path(raw.db_path)?;

        let log_level = if raw.debug {
            LogLevel::Debug
        } else {
            raw.log_level.unwrap_or_default()
        };

        Ok(Self {
            token,
            channels,
            debug: raw.debug,
            poll_timeout_secs,
            db_path,
            log_level,
        })
    }
}

/// Configured database path, or the per-user default location
pub fn resolve_db_path(configured: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match configured {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => DatabaseConnection::default_database_path()
            .map_err(|e| ConfigError::Database(e.to_string())),
    }
}

/// Long-poll seconds; zero or an unparsable value falls back to the default
pub fn parse_timeout(value: &str) -> u32 {
    let value = value.trim();
    if value.is_empty() {
        return DEFAULT_POLL_TIMEOUT_SECS;
    }
    match value.parse::<u32>() {
        Ok(0) => DEFAULT_POLL_TIMEOUT_SECS,
        Ok(secs) => secs,
        Err(e) => {
            warn!(
                "Ignoring {}={:?} ({}), using {}s",
                ENV_TIMEOUT, value, e, DEFAULT_POLL_TIMEOUT_SECS
            );
            DEFAULT_POLL_TIMEOUT_SECS
        }
    }
}

/// Parse the debug flag the way the environment spells it
pub fn parse_debug_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true") || value.trim() == "1"
}
