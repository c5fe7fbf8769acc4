use serde::{Deserialize, Serialize};

use super::message::Message;

/// Inbound request body for producing a message.
///
/// Kept separate from [`Message`] so the external shape can grow (client
/// metadata, idempotency keys) without touching what goes on the wire.
/// Both fields are required; the body is passed through as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub message_id: i64,
    pub message: String,
}

impl MessageRequest {
    pub fn new(message_id: i64, message: impl Into<String>) -> Self {
        Self {
            message_id,
            message: message.into(),
        }
    }
}

impl From<MessageRequest> for Message {
    fn from(request: MessageRequest) -> Self {
        Message::new(request.message_id, request.message)
    }
}
