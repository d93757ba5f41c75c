/*!
 * Error types for the vocabacov application.
 *
 * This module contains custom error types for the different failure classes of the bot,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while resolving the startup configuration.
///
/// These are fatal: the bot must not start when any of them occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Bot token was not provided
    #[error("token not found in environment variable {0}")]
    MissingToken(&'static str),

    /// Channel allow-list was not provided at all
    #[error("channelId not found in environment variable {0}")]
    MissingChannelList(&'static str),

    /// Channel allow-list resolved to no identifiers
    #[error("channels not found")]
    NoChannels,

    /// A channel token is not a signed 64-bit integer
    #[error("channel {token:?} int parsing error: {source}")]
    InvalidChannel {
        /// The offending token, already trimmed
        token: String,
        /// Underlying integer parse failure
        source: ParseIntError,
    },

    /// Database location could not be determined
    #[error("database location error: {0}")]
    Database(String),
}

/// Errors produced when chat text looks like a command or a phrase but is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Nothing but slashes (or slashes followed by whitespace)
    #[error("command is empty")]
    EmptyCommand,

    /// A known command was sent without its language argument
    #[error("{0} should have lang argument")]
    MissingLang(String),

    /// Phrase text did not have exactly three lines
    #[error("tokens size is incorrect")]
    TokensSize {
        /// Number of lines found
        found: usize,
    },

    #[error("lang is empty")]
    EmptyLang,

    #[error("phrase is empty")]
    EmptyPhrase,

    #[error("translation is empty")]
    EmptyTranslation,
}

impl SyntaxError {
    /// Whether the error comes from the command grammar rather than the phrase grammar
    pub fn is_command(&self) -> bool {
        matches!(self, Self::EmptyCommand | Self::MissingLang(_))
    }
}

/// Errors returned by a phrase repository
#[derive(Error, Debug)]
pub enum RepoError {
    /// The underlying store failed
    #[error("database error: {0}")]
    Database(String),

    /// A stored value could not be mapped back to a model
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<anyhow::Error> for RepoError {
    fn from(error: anyhow::Error) -> Self {
        Self::Database(format!("{:#}", error))
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database(error.to_string())
    }
}

/// Error returned when the outbound sink rejects a message or document
#[derive(Error, Debug)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Errors raised by the bulk format adapters
#[derive(Error, Debug)]
pub enum FormatError {
    /// The JSON document could not be read
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A flashcard line could not be split into phrase and translation
    #[error("line {line}: {message}")]
    Line {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A record had an empty field
    #[error("empty {field} in {lang} record")]
    EmptyField {
        /// Language the record belongs to
        lang: String,
        /// Name of the empty field
        field: &'static str,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Startup configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the phrase repository
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    /// Error from a bulk format adapter
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from the chat transport
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Command-line arguments that do not fit together
    #[error("Usage error: {0}")]
    Usage(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
