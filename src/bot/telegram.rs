/*!
 * Telegram transport.
 *
 * Long-polls `getUpdates` for new messages and answers with `sendMessage` /
 * `sendDocument`. Only plain messages are requested; edits, callbacks and the
 * rest of the update kinds are not part of the bot's protocol.
 */

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use teloxide::{
    ApiError, RequestError,
    payloads::SendMessageSetters,
    prelude::*,
    types::{AllowedUpdate, InputFile, MessageId, ReplyParameters, UpdateKind},
};

use super::transport::{InboundMessage, MessageSink, MessageSource};
use crate::errors::DeliveryError;

/// Pause before polling again after a failed `getUpdates`
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Extra HTTP client time on top of the long-poll timeout
const CLIENT_TIMEOUT_MARGIN_SECS: u64 = 15;

/// Build a bot whose HTTP client outlives the long-poll, verify the token and clear any webhook
pub async fn connect(token: &str, poll_timeout_secs: u32) -> Result<Bot> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(
            u64::from(poll_timeout_secs) + CLIENT_TIMEOUT_MARGIN_SECS,
        ))
        .build()?;
    let bot = Bot::with_client(token, client);

    let me = bot.get_me().await?;
    bot.delete_webhook().await?;
    info!("Authorized on account {:?}", me.username);

    Ok(bot)
}

/// Inbound side: a buffered long-polling loop
pub struct TelegramSource {
    bot: Bot,
    offset: i32,
    poll_timeout_secs: u32,
    pending: VecDeque<InboundMessage>,
}

impl TelegramSource {
    pub fn new(bot: Bot, poll_timeout_secs: u32) -> Self {
        Self {
            bot,
            offset: 0,
            poll_timeout_secs,
            pending: VecDeque::new(),
        }
    }
}

/// Errors after which polling cannot succeed again
fn is_fatal(error: &RequestError) -> bool {
    matches!(
        error,
        RequestError::Api(ApiError::TerminatedByOtherGetUpdates | ApiError::InvalidToken)
    )
}

#[async_trait]
impl MessageSource for TelegramSource {
    async fn next_message(&mut self) -> Option<InboundMessage> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(message);
            }

            let result = self
                .bot
                .get_updates()
                .offset(self.offset)
                .timeout(self.poll_timeout_secs)
                .allowed_updates(vec![AllowedUpdate::Message])
                .await;

            match result {
                Ok(updates) => {
                    debug!("Got {} telegram updates", updates.len());
                    for update in updates {
                        self.offset = update.id.as_offset();
                        if let UpdateKind::Message(msg) = update.kind {
                            self.pending.push_back(InboundMessage {
                                chat_id: msg.chat.id.0,
                                message_id: msg.id.0,
                                text: msg.text().map(str::to_string),
                            });
                        }
                    }
                }
                Err(e) if is_fatal(&e) => {
                    error!("Telegram polling stopped: {}", e);
                    return None;
                }
                Err(e) => {
                    warn!("Error getting telegram updates: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }
}

/// Outbound side
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn send_text(&self, chat_id: i64, reply_to: i32, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_parameters(ReplyParameters::new(MessageId(reply_to)))
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }

    async fn send_document(
        &self,
        chat_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), DeliveryError> {
        let input = InputFile::memory(bytes).file_name(file_name.to_string());
        self.bot
            .send_document(ChatId(chat_id), input)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}
