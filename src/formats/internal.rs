/*!
 * Native JSON bulk format: `{"<lang>": [{"p": "<phrase>", "t": "<translation>"}]}`.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PhraseBook, trimmed_phrase};
use crate::errors::FormatError;

/// One card as stored in the JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    #[serde(rename = "p")]
    phrase: String,
    #[serde(rename = "t")]
    translation: String,
}

/// Serialize a phrase book to JSON bytes
pub fn write(book: &PhraseBook) -> Result<Vec<u8>, FormatError> {
    let document: BTreeMap<&str, Vec<Record>> = book
        .iter()
        .map(|(lang, phrases)| {
            let records = phrases
                .iter()
                .map(|p| Record {
                    phrase: p.phrase.clone(),
                    translation: p.translation.clone(),
                })
                .collect();
            (lang, records)
        })
        .collect();

    Ok(serde_json::to_vec(&document)?)
}

/// Parse JSON bytes into a phrase book of active phrases
pub fn read(data: &[u8]) -> Result<PhraseBook, FormatError> {
    let document: BTreeMap<String, Vec<Record>> = serde_json::from_slice(data)?;

    let mut book = PhraseBook::new();
    for (lang, records) in &document {
        for record in records {
            book.push(trimmed_phrase(lang, &record.phrase, &record.translation)?);
        }
    }
    Ok(book)
}
