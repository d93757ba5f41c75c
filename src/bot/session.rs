/*!
 * The message loop.
 *
 * Each inbound message is gated by the channel allow-list, interpreted, and
 * routed to the command dispatcher or the phrase ingestor. Nothing that goes
 * wrong with one message stops the loop; it ends only when the source closes.
 */

use log::{debug, info, warn};

use super::dispatcher::{CommandDispatcher, CommandOutcome};
use super::ingestor::{IngestOutcome, PhraseIngestor};
use super::replies;
use super::transport::{InboundMessage, MessageSink, MessageSource};
use crate::access::ChannelSet;
use crate::database::repository::PhraseRepository;
use crate::errors::SyntaxError;
use crate::interpreter::{self, Parsed};

/// How one inbound message was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Message without a text body
    NoText,
    /// Chat not on the allow-list; dropped without a reply
    Unauthorized,
    /// Text not addressed to the bot
    Ignored,
    /// Malformed command or phrase; the user got a syntax reply
    Syntax(SyntaxError),
    Command(CommandOutcome),
    Phrase(IngestOutcome),
}

/// Everything the loop needs, built once at startup
pub struct Session<R, S> {
    channels: ChannelSet,
    repository: R,
    sink: S,
}

impl<R, S> Session<R, S>
where
    R: PhraseRepository,
    S: MessageSink,
{
    pub fn new(channels: ChannelSet, repository: R, sink: S) -> Self {
        Self {
            channels,
            repository,
            sink,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume `source` until it closes; returns the number of messages seen
    pub async fn run<M>(&self, source: &mut M) -> usize
    where
        M: MessageSource + ?Sized,
    {
        info!("Session started for channels {}", self.channels);
        let mut processed = 0;
        while let Some(message) = source.next_message().await {
            let outcome = self.handle(&message).await;
            debug!("Message {} in chat {}: {:?}", message.message_id, message.chat_id, outcome);
            processed += 1;
        }
        info!("Message source closed after {} messages", processed);
        processed
    }

    /// Handle a single message
    pub async fn handle(&self, message: &InboundMessage) -> MessageOutcome {
        let Some(text) = message.text.as_deref() else {
            return MessageOutcome::NoText;
        };

        if !self.channels.is_authorized(message.chat_id) {
            debug!("Dropping message from unauthorized chat {}", message.chat_id);
            return MessageOutcome::Unauthorized;
        }

        match interpreter::interpret(text) {
            Ok(Parsed::Command(command)) => {
                let dispatcher = CommandDispatcher::new(&self.repository, &self.sink);
                MessageOutcome::Command(dispatcher.dispatch(message, &command).await)
            }
            Ok(Parsed::Phrase(phrase)) => {
                let ingestor = PhraseIngestor::new(&self.repository, &self.sink);
                MessageOutcome::Phrase(ingestor.ingest(message, &phrase).await)
            }
            Ok(Parsed::Unrecognized) => MessageOutcome::Ignored,
            Err(e) => {
                let text = if e.is_command() {
                    warn!("Find command error: {}", e);
                    replies::COMMAND_SYNTAX
                } else {
                    warn!("Find phrase error: {}", e);
                    replies::PHRASE_SYNTAX
                };
                super::reply(&self.sink, message, text).await;
                MessageOutcome::Syntax(e)
            }
        }
    }
}
