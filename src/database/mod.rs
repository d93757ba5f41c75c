/*!
 * Database module for persistent storage of phrases.
 *
 * This module provides:
 * - the `PhraseRepository` trait the bot depends on
 * - a SQLite implementation with a versioned schema
 * - an in-memory implementation for tests and dry runs
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;
pub mod memory;

// Re-export main types
pub use connection::DatabaseConnection;
pub use memory::{FailOn, MemoryRepository};
pub use models::{Phrase, PhraseStatus};
pub use repository::{PhraseRepository, Repository};
