use serde::{Deserialize, Serialize};

/// A message as published and consumed.
///
/// `message_id` is supplied by the caller; nothing in the pipeline generates
/// or rewrites it. It doubles as the envelope key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub message: String,
}

impl Message {
    pub fn new(message_id: i64, message: impl Into<String>) -> Self {
        Self {
            message_id,
            message: message.into(),
        }
    }

    /// The envelope key for this message.
    pub fn id(&self) -> i64 {
        self.message_id
    }
}
