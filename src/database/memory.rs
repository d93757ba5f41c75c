/*!
 * In-memory phrase repository.
 *
 * Keeps phrases in a vector and records every status update, which makes it
 * handy for exercising the bot without a database:
 * - `MemoryRepository::new()` - behaves like a real store
 * - `MemoryRepository::failing(..)` - rejects the selected operations
 */

use async_trait::async_trait;
use parking_lot::Mutex;

use super::models::{Phrase, PhraseStatus};
use super::repository::PhraseRepository;
use crate::errors::RepoError;

/// Repository operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FailOn {
    pub insert: bool,
    pub set_status: bool,
    pub query: bool,
}

/// Vector-backed repository that records status updates
#[derive(Debug, Default)]
pub struct MemoryRepository {
    phrases: Mutex<Vec<Phrase>>,
    status_updates: Mutex<Vec<(String, PhraseStatus)>>,
    fail_on: FailOn,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the given phrases
    pub fn with_phrases(phrases: Vec<Phrase>) -> Self {
        Self {
            phrases: Mutex::new(phrases),
            ..Self::default()
        }
    }

    /// Repository whose selected operations always fail
    pub fn failing(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            ..Self::default()
        }
    }

    /// Same repository with failures switched on for the selected operations
    pub fn fail_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = fail_on;
        self
    }

    /// Snapshot of stored phrases
    pub fn phrases(&self) -> Vec<Phrase> {
        self.phrases.lock().clone()
    }

    /// Every `set_status` call that succeeded, in order
    pub fn status_updates(&self) -> Vec<(String, PhraseStatus)> {
        self.status_updates.lock().clone()
    }

    fn injected(operation: &str) -> RepoError {
        RepoError::Database(format!("injected {} failure", operation))
    }
}

#[async_trait]
impl PhraseRepository for MemoryRepository {
    async fn insert(&self, phrase: &Phrase) -> Result<usize, RepoError> {
        if self.fail_on.insert {
            return Err(Self::injected("insert"));
        }
        self.phrases.lock().push(phrase.clone());
        Ok(1)
    }

    async fn set_status(&self, lang: &str, status: PhraseStatus) -> Result<usize, RepoError> {
        if self.fail_on.set_status {
            return Err(Self::injected("set_status"));
        }
        let mut phrases = self.phrases.lock();
        let mut rows = 0;
        for phrase in phrases.iter_mut().filter(|p| p.lang == lang) {
            phrase.status = status;
            rows += 1;
        }
        self.status_updates.lock().push((lang.to_string(), status));
        Ok(rows)
    }

    async fn query_active(&self, lang: &str) -> Result<Vec<Phrase>, RepoError> {
        if self.fail_on.query {
            return Err(Self::injected("query"));
        }
        Ok(self
            .phrases
            .lock()
            .iter()
            .filter(|p| p.lang == lang && p.is_active())
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> Result<Vec<Phrase>, RepoError> {
        if self.fail_on.query {
            return Err(Self::injected("query"));
        }
        Ok(self.phrases.lock().clone())
    }
}
