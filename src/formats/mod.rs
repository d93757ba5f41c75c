/*!
 * Bulk phrase formats.
 *
 * Both formats read and write a [`PhraseBook`], phrases grouped by language:
 * - `internal`: a JSON object of arrays, `{"en": [{"p": "...", "t": "..."}]}`
 * - `anki`: one tab-separated flashcard per line, one language per file
 *
 * Status is not part of either format; everything read back is active.
 */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::database::models::Phrase;
use crate::errors::FormatError;

pub mod anki;
pub mod internal;

/// Supported bulk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkFormat {
    /// Native JSON map of arrays
    #[default]
    Internal,
    /// Anki plain-text import format
    Anki,
}

impl fmt::Display for BulkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::Anki => write!(f, "anki"),
        }
    }
}

impl FromStr for BulkFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "anki" => Ok(Self::Anki),
            _ => Err(anyhow::anyhow!("bad format: {}", s)),
        }
    }
}

/// Phrases grouped by language, insertion order kept within a language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseBook {
    languages: BTreeMap<String, Vec<Phrase>>,
}

impl PhraseBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase to its language
    pub fn push(&mut self, phrase: Phrase) {
        self.languages.entry(phrase.lang.clone()).or_default().push(phrase);
    }

    /// Phrases of one language
    pub fn get(&self, lang: &str) -> &[Phrase] {
        self.languages.get(lang).map(Vec::as_slice).unwrap_or_default()
    }

    /// Languages in lexical order with their phrases
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Phrase])> {
        self.languages.iter().map(|(lang, phrases)| (lang.as_str(), phrases.as_slice()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Total number of phrases
    pub fn len(&self) -> usize {
        self.languages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten back into a phrase list, language by language
    pub fn into_phrases(self) -> Vec<Phrase> {
        self.languages.into_values().flatten().collect()
    }
}

impl FromIterator<Phrase> for PhraseBook {
    fn from_iter<I: IntoIterator<Item = Phrase>>(iter: I) -> Self {
        let mut book = Self::new();
        for phrase in iter {
            book.push(phrase);
        }
        book
    }
}

/// Build an active phrase from raw file fields, trimmed like chat input
pub(crate) fn trimmed_phrase(
    lang: &str,
    phrase: &str,
    translation: &str,
) -> Result<Phrase, FormatError> {
    let lang = lang.trim();
    let empty = |field| FormatError::EmptyField { lang: lang.to_string(), field };
    if lang.is_empty() {
        return Err(empty("lang"));
    }
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Err(empty("phrase"));
    }
    let translation = translation.trim();
    if translation.is_empty() {
        return Err(empty("translation"));
    }
    Ok(Phrase::new(lang, phrase, translation))
}
