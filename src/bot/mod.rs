/*!
 * The chat bot: everything between an inbound chat message and the phrase store.
 *
 * - `transport`: source and sink traits, the inbound message type
 * - `session`: the loop gating, interpreting and routing each message
 * - `dispatcher`: `/export` and `/reset`
 * - `ingestor`: storing new phrases
 * - `telegram`: Telegram long-polling transport
 * - `mock`: recording sink for tests
 */

use log::{error, info};

pub mod dispatcher;
pub mod ingestor;
pub mod mock;
pub mod session;
pub mod telegram;
pub mod transport;

pub use dispatcher::{CommandDispatcher, CommandOutcome};
pub use ingestor::{IngestOutcome, PhraseIngestor};
pub use session::{MessageOutcome, Session};
pub use transport::{InboundMessage, MessageSink, MessageSource};

/// Fixed replies; internal error detail never reaches the chat
pub mod replies {
    pub const DONE: &str = "done";
    pub const COMMAND_SYNTAX: &str = "command has incorrect syntax";
    pub const PHRASE_SYNTAX: &str = "phrase has incorrect syntax";
    pub const NO_ACTIVE_PHRASES: &str = "no active phrases exist to export";
    pub const LOAD_ERROR: &str = "error load phrases";
    pub const ARCHIVE_ERROR: &str = "error archive phrases after export";
    pub const RESET_ERROR: &str = "error reset phrases";
    pub const SAVE_ERROR: &str = "db save error";
}

/// Send a text reply; delivery failures are logged and otherwise ignored
pub(crate) async fn reply<S>(sink: &S, origin: &InboundMessage, text: &str)
where
    S: MessageSink + ?Sized,
{
    match sink.send_text(origin.chat_id, origin.message_id, text).await {
        Ok(()) => info!(
            "Message sent to chat {} (reply to {}): {}",
            origin.chat_id, origin.message_id, text
        ),
        Err(e) => error!(
            "Error sending message to chat {} (reply to {}): {}",
            origin.chat_id, origin.message_id, e
        ),
    }
}
