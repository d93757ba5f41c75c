/*!
 * Repository layer for phrase storage.
 *
 * [`PhraseRepository`] is the seam the bot talks to; [`Repository`] is the
 * SQLite implementation behind it.
 */

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Row};

use super::connection::DatabaseConnection;
use super::models::{Phrase, PhraseStatus};
use crate::errors::RepoError;

/// Storage operations the bot and the bulk tools need
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    /// Store a new phrase; returns the number of rows written
    async fn insert(&self, phrase: &Phrase) -> Result<usize, RepoError>;

    /// Set `status` on every phrase of `lang`; returns the number of rows touched
    async fn set_status(&self, lang: &str, status: PhraseStatus) -> Result<usize, RepoError>;

    /// Active phrases of `lang` in insertion order
    async fn query_active(&self, lang: &str) -> Result<Vec<Phrase>, RepoError>;

    /// Every phrase of every language in insertion order
    async fn query_all(&self) -> Result<Vec<Phrase>, RepoError>;

    /// Store many phrases.
    ///
    /// The default inserts one at a time and stops at the first failure;
    /// implementations with transactions should make it all-or-nothing.
    async fn insert_all(&self, phrases: Vec<Phrase>) -> Result<usize, RepoError> {
        let mut rows = 0;
        for phrase in &phrases {
            rows += self.insert(phrase).await?;
        }
        Ok(rows)
    }
}

/// SQLite-backed phrase repository
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn parse_phrase_row(row: &Row) -> rusqlite::Result<Phrase> {
        let status: String = row.get(3)?;
        let status = status.parse().map_err(|e: anyhow::Error| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?;

        Ok(Phrase {
            lang: row.get(0)?,
            phrase: row.get(1)?,
            translation: row.get(2)?,
            status,
        })
    }
}

#[async_trait]
impl PhraseRepository for Repository {
    async fn insert(&self, phrase: &Phrase) -> Result<usize, RepoError> {
        let phrase = phrase.clone();
        let now = chrono::Utc::now().to_rfc3339();

        let rows = self
            .db
            .run(move |conn| {
                let rows = conn.execute(
                    r#"
                    INSERT INTO phrases (lang, phrase, translation, status, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        phrase.lang,
                        phrase.phrase,
                        phrase.translation,
                        phrase.status.to_string(),
                        now,
                    ],
                )?;
                debug!("Inserted phrase {} ({} row)", phrase, rows);
                Ok(rows)
            })
            .await?;

        Ok(rows)
    }

    async fn set_status(&self, lang: &str, status: PhraseStatus) -> Result<usize, RepoError> {
        let lang = lang.to_string();

        let rows = self
            .db
            .run(move |conn| {
                let rows = conn.execute(
                    "UPDATE phrases SET status = ?1 WHERE lang = ?2",
                    params![status.to_string(), lang],
                )?;
                debug!("Set status {} on {} phrases of lang {}", status, rows, lang);
                Ok(rows)
            })
            .await?;

        Ok(rows)
    }

    async fn query_active(&self, lang: &str) -> Result<Vec<Phrase>, RepoError> {
        let lang = lang.to_string();

        let phrases = self
            .db
            .run(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT lang, phrase, translation, status
                    FROM phrases
                    WHERE lang = ?1 AND status = 'ACTIVE'
                    ORDER BY id
                    "#,
                )?;

                let phrases = stmt
                    .query_map([&lang], Self::parse_phrase_row)?
                    .collect::<rusqlite::Result<Vec<Phrase>>>()?;
                Ok(phrases)
            })
            .await?;

        Ok(phrases)
    }

    async fn query_all(&self) -> Result<Vec<Phrase>, RepoError> {
        let phrases = self
            .db
            .run(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT lang, phrase, translation, status
                    FROM phrases
                    ORDER BY id
                    "#,
                )?;

                let phrases = stmt
                    .query_map([], Self::parse_phrase_row)?
                    .collect::<rusqlite::Result<Vec<Phrase>>>()?;
                Ok(phrases)
            })
            .await?;

        Ok(phrases)
    }

    async fn insert_all(&self, phrases: Vec<Phrase>) -> Result<usize, RepoError> {
        let now = chrono::Utc::now().to_rfc3339();

        let rows = self
            .db
            .run_in_transaction(move |tx| {
                let mut rows = 0;
                for phrase in phrases {
                    rows += tx.execute(
                        r#"
                        INSERT INTO phrases (lang, phrase, translation, status, created_at)
                        VALUES (?1, ?2, ?3, ?4, ?5)
                        "#,
                        params![
                            phrase.lang,
                            phrase.phrase,
                            phrase.translation,
                            phrase.status.to_string(),
                            now,
                        ],
                    )?;
                }
                Ok(rows)
            })
            .await?;

        Ok(rows)
    }
}
