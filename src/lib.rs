/*!
 * # vocabacov - a vocabulary collection chat bot
 *
 * Collects foreign-language phrases and their translations sent as chat
 * messages, stores them, and hands them back as flashcard files.
 *
 * ## Features
 *
 * - Three-line phrase messages: `/<lang>`, phrase, translation
 * - `/export <lang>`: send active phrases as an Anki file and archive them
 * - `/reset <lang>`: make every phrase of a language active again
 * - Channel allow-list; messages from other chats are dropped silently
 * - SQLite storage with a versioned schema
 * - Bulk export and import in JSON or Anki format
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration resolution
 * - `access`: Channel allow-list
 * - `interpreter`: Chat text to command or phrase
 * - `database`: Phrase repository trait and its implementations
 * - `bot`: Message loop, command dispatcher, phrase ingestor and transports
 * - `formats`: Bulk phrase formats
 * - `bulk`: File export and import built on `formats`
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod access;
pub mod app_config;
pub mod bot;
pub mod bulk;
pub mod database;
pub mod errors;
pub mod formats;
pub mod interpreter;

// Re-export main types for easier usage
pub use access::ChannelSet;
pub use app_config::{BotConfig, RawSettings};
pub use bot::{InboundMessage, MessageOutcome, Session};
pub use database::{MemoryRepository, Phrase, PhraseRepository, PhraseStatus, Repository};
pub use errors::{AppError, ConfigError, DeliveryError, FormatError, RepoError, SyntaxError};
pub use interpreter::{Command, CommandName, Parsed, interpret};
