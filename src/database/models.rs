/*!
 * Database entity models.
 *
 * These structures map directly to the `phrases` table and are shared by the
 * message handlers and the bulk format adapters.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a stored phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhraseStatus {
    /// Eligible for the next export
    #[default]
    Active,
    /// Already exported, skipped until the language is reset
    Archived,
}

impl fmt::Display for PhraseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhraseStatus::Active => write!(f, "ACTIVE"),
            PhraseStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

impl std::str::FromStr for PhraseStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(PhraseStatus::Active),
            "ARCHIVED" => Ok(PhraseStatus::Archived),
            _ => Err(anyhow::anyhow!("Invalid phrase status: {}", s)),
        }
    }
}

/// A vocabulary entry: a phrase in some language and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    /// Short language code, e.g. "en"
    pub lang: String,
    /// Source-language text
    pub phrase: String,
    /// Target-language text
    pub translation: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: PhraseStatus,
}

impl Phrase {
    /// Create a new active phrase
    pub fn new(
        lang: impl Into<String>,
        phrase: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            lang: lang.into(),
            phrase: phrase.into(),
            translation: translation.into(),
            status: PhraseStatus::Active,
        }
    }

    /// Same record with a different status
    pub fn with_status(mut self, status: PhraseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == PhraseStatus::Active
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} => {} ({})", self.lang, self.phrase, self.translation, self.status)
    }
}
