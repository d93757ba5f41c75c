/*!
 * Transport seams of the bot.
 *
 * The session loop pulls [`InboundMessage`]s from a [`MessageSource`] and
 * answers through a [`MessageSink`]. The Telegram implementation lives in
 * `bot::telegram`; tests use channels and the mock sink.
 */

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::errors::DeliveryError;

/// A chat message already stripped down to what the bot needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Chat the message came from
    pub chat_id: i64,
    /// Message id to reply to
    pub message_id: i32,
    /// Text body, absent for stickers, photos and the like
    pub text: Option<String>,
}

impl InboundMessage {
    /// Text message, mostly for tests
    pub fn text(chat_id: i64, message_id: i32, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            text: Some(text.into()),
        }
    }
}

/// Lazy, possibly endless stream of inbound messages
#[async_trait]
pub trait MessageSource: Send {
    /// Next message, or `None` once the transport is closed
    async fn next_message(&mut self) -> Option<InboundMessage>;
}

#[async_trait]
impl MessageSource for mpsc::Receiver<InboundMessage> {
    async fn next_message(&mut self) -> Option<InboundMessage> {
        self.recv().await
    }
}

/// Outbound side of the chat transport
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Reply to `reply_to` in `chat_id` with plain text
    async fn send_text(&self, chat_id: i64, reply_to: i32, text: &str) -> Result<(), DeliveryError>;

    /// Send a file attachment to `chat_id`
    async fn send_document(
        &self,
        chat_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), DeliveryError>;
}
