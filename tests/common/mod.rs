/*!
 * Common test utilities for the vocabacov test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;
use tokio::sync::mpsc;

use vocabacov::access::ChannelSet;
use vocabacov::bot::InboundMessage;
use vocabacov::bot::mock::MockSink;
use vocabacov::bot::session::Session;
use vocabacov::database::{Phrase, Repository};

/// Chat every test session accepts
pub const CHAT_ID: i64 = 42;

/// Chat no test session accepts
pub const STRANGER_CHAT_ID: i64 = -777;

/// Routes library logging to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Session over an in-memory SQLite repository and a working mock sink
pub fn sqlite_session() -> Result<Session<Repository, MockSink>> {
    init_test_logging();
    Ok(Session::new(
        ChannelSet::parse(&CHAT_ID.to_string())?,
        Repository::new_in_memory()?,
        MockSink::working(),
    ))
}

/// Text message from the accepted chat
pub fn message(message_id: i32, text: &str) -> InboundMessage {
    InboundMessage::text(CHAT_ID, message_id, text)
}

/// Channel-backed message source preloaded with `messages` and already closed
pub fn closed_source(messages: Vec<InboundMessage>) -> mpsc::Receiver<InboundMessage> {
    let (tx, rx) = mpsc::channel(messages.len().max(1));
    for message in messages {
        // capacity covers every message
        let _ = tx.try_send(message);
    }
    rx
}

/// A handful of phrases across two languages
pub fn sample_phrases() -> Vec<Phrase> {
    vec![
        Phrase::new("en", "cruel", "жестокий"),
        Phrase::new("en", "to put up with", "мириться с"),
        Phrase::new("es", "hola", "привет"),
        Phrase::new("en", "say \"cheese\"", "скажите \"сыр\""),
    ]
}
