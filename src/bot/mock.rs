/*!
 * Mock message sink for testing.
 *
 * Records everything the bot tries to send:
 * - `MockSink::working()` - accepts every message
 * - `MockSink::failing_documents()` - rejects documents, accepts text
 * - `MockSink::failing()` - rejects everything
 */

use async_trait::async_trait;
use parking_lot::Mutex;

use super::transport::MessageSink;
use crate::errors::DeliveryError;

/// Something the bot sent (or tried to send)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: i64,
        reply_to: i32,
        text: String,
    },
    Document {
        chat_id: i64,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// Behavior mode for the mock sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Every send succeeds
    Working,
    /// Documents fail, text replies succeed
    FailingDocuments,
    /// Every send fails
    Failing,
}

/// Sink that records attempts instead of talking to a chat service
#[derive(Debug)]
pub struct MockSink {
    behavior: MockBehavior,
    sent: Mutex<Vec<Sent>>,
}

impl MockSink {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing_documents() -> Self {
        Self::new(MockBehavior::FailingDocuments)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Every attempt, successful or not, in order
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    /// Text of every reply attempt
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text.clone()),
                Sent::Document { .. } => None,
            })
            .collect()
    }

    /// File name and contents of every document attempt
    pub fn documents(&self) -> Vec<(String, Vec<u8>)> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Document { file_name, bytes, .. } => Some((file_name.clone(), bytes.clone())),
                Sent::Text { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl MessageSink for MockSink {
    async fn send_text(&self, chat_id: i64, reply_to: i32, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().push(Sent::Text {
            chat_id,
            reply_to,
            text: text.to_string(),
        });
        match self.behavior {
            MockBehavior::Failing => Err(DeliveryError("mock text failure".to_string())),
            _ => Ok(()),
        }
    }

    async fn send_document(
        &self,
        chat_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().push(Sent::Document {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
        });
        match self.behavior {
            MockBehavior::Working => Ok(()),
            _ => Err(DeliveryError("mock document failure".to_string())),
        }
    }
}
