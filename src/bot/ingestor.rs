/*!
 * Storing phrases sent to the bot.
 */

use log::{error, info};

use super::replies;
use super::transport::{InboundMessage, MessageSink};
use crate::database::models::Phrase;
use crate::database::repository::PhraseRepository;

/// What happened to a submitted phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Saved,
    /// The repository rejected it; the user was told, nothing is retried
    SaveFailed,
}

/// Persists parsed phrases and acknowledges them
pub struct PhraseIngestor<'a, R: ?Sized, S: ?Sized> {
    repository: &'a R,
    sink: &'a S,
}

impl<'a, R, S> PhraseIngestor<'a, R, S>
where
    R: PhraseRepository + ?Sized,
    S: MessageSink + ?Sized,
{
    pub fn new(repository: &'a R, sink: &'a S) -> Self {
        Self { repository, sink }
    }

    /// Store `phrase` once and reply "done" or "db save error"
    pub async fn ingest(&self, origin: &InboundMessage, phrase: &Phrase) -> IngestOutcome {
        let (outcome, text) = match self.repository.insert(phrase).await {
            Ok(rows) => {
                info!("Inserted phrase {} ({} rows)", phrase, rows);
                (IngestOutcome::Saved, replies::DONE)
            }
            Err(e) => {
                error!("DB save error for phrase {}: {}", phrase, e);
                (IngestOutcome::SaveFailed, replies::SAVE_ERROR)
            }
        };

        super::reply(self.sink, origin, text).await;
        outcome
    }
}
