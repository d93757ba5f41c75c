/*!
 * Command handling.
 *
 * `/export <lang>` sends the active phrases of a language as an Anki file and
 * archives the language once the file is delivered. `/reset <lang>` makes
 * every phrase of a language active again.
 */

use chrono::{DateTime, Local};
use log::{error, info, warn};

use super::replies;
use super::transport::{InboundMessage, MessageSink};
use crate::database::models::PhraseStatus;
use crate::database::repository::PhraseRepository;
use crate::formats::anki;
use crate::interpreter::{Command, CommandName};

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// File delivered and the language archived
    Exported {
        lang: String,
        file_name: String,
        exported: usize,
        archived: usize,
    },
    /// No active phrases; nothing sent
    NothingToExport { lang: String },
    /// Active phrases could not be loaded
    LoadFailed { lang: String },
    /// The sink rejected the file; nothing archived
    DeliveryFailed { lang: String, file_name: String },
    /// File delivered but the archive update failed
    ArchiveFailed { lang: String, file_name: String },
    /// Every phrase of the language is active again
    Reset { lang: String, rows: usize },
    ResetFailed { lang: String },
}

/// Name of an export file: `<lang>-<YYYYMMDDhhmmss>.txt`
pub fn export_file_name(lang: &str, at: DateTime<Local>) -> String {
    format!("{}-{}.txt", lang, at.format("%Y%m%d%H%M%S"))
}

/// Runs parsed commands against a repository and answers through a sink
pub struct CommandDispatcher<'a, R: ?Sized, S: ?Sized> {
    repository: &'a R,
    sink: &'a S,
}

impl<'a, R, S> CommandDispatcher<'a, R, S>
where
    R: PhraseRepository + ?Sized,
    S: MessageSink + ?Sized,
{
    pub fn new(repository: &'a R, sink: &'a S) -> Self {
        Self { repository, sink }
    }

    /// Execute `command` on behalf of `origin`
    pub async fn dispatch(&self, origin: &InboundMessage, command: &Command) -> CommandOutcome {
        let lang = command.lang();
        match command.name() {
            CommandName::Export => self.export(origin, lang).await,
            CommandName::Reset => self.reset(origin, lang).await,
        }
    }

    async fn export(&self, origin: &InboundMessage, lang: &str) -> CommandOutcome {
        let phrases = match self.repository.query_active(lang).await {
            Ok(phrases) => phrases,
            Err(e) => {
                error!("Load phrases error for lang {}: {}", lang, e);
                super::reply(self.sink, origin, replies::LOAD_ERROR).await;
                return CommandOutcome::LoadFailed { lang: lang.to_string() };
            }
        };

        if phrases.is_empty() {
            super::reply(self.sink, origin, replies::NO_ACTIVE_PHRASES).await;
            return CommandOutcome::NothingToExport { lang: lang.to_string() };
        }

        let file_name = export_file_name(lang, Local::now());
        let data = anki::write(&phrases);
        if let Err(e) = self.sink.send_document(origin.chat_id, &file_name, data).await {
            error!(
                "Error sending document {} to chat {}: {}",
                file_name, origin.chat_id, e
            );
            return CommandOutcome::DeliveryFailed {
                lang: lang.to_string(),
                file_name,
            };
        }
        info!(
            "Document {} with {} phrases sent to chat {}",
            file_name,
            phrases.len(),
            origin.chat_id
        );

        // archives the whole language, including rows added after the query
        match self.repository.set_status(lang, PhraseStatus::Archived).await {
            Ok(archived) => {
                if archived != phrases.len() {
                    warn!(
                        "Archived {} phrases of lang {} but exported {}",
                        archived,
                        lang,
                        phrases.len()
                    );
                }
                CommandOutcome::Exported {
                    lang: lang.to_string(),
                    file_name,
                    exported: phrases.len(),
                    archived,
                }
            }
            Err(e) => {
                error!("Archive phrases error for lang {}: {}", lang, e);
                super::reply(self.sink, origin, replies::ARCHIVE_ERROR).await;
                CommandOutcome::ArchiveFailed {
                    lang: lang.to_string(),
                    file_name,
                }
            }
        }
    }

    async fn reset(&self, origin: &InboundMessage, lang: &str) -> CommandOutcome {
        match self.repository.set_status(lang, PhraseStatus::Active).await {
            Ok(rows) => {
                info!("Reset {} phrases of lang {}", rows, lang);
                super::reply(self.sink, origin, replies::DONE).await;
                CommandOutcome::Reset {
                    lang: lang.to_string(),
                    rows,
                }
            }
            Err(e) => {
                error!("Reset phrases error for lang {}: {}", lang, e);
                super::reply(self.sink, origin, replies::RESET_ERROR).await;
                CommandOutcome::ResetFailed { lang: lang.to_string() }
            }
        }
    }
}
