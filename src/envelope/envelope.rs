//! The typed wrapper published on a channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event_type::EventType;

/// A domain payload wrapped with its event kind, correlation key and
/// creation time.
///
/// Fields are private and there are no setters: once built, an envelope
/// is frozen. `event_created_at` is stamped in `new` and never recomputed,
/// including across serialization.
///
/// ## Wire shape (JSON)
///
/// ```json
/// {
///   "eventType": "CREATE",
///   "key": 42,
///   "data": { "messageId": 42, "message": "hello" },
///   "eventCreatedAt": "2024-05-01T12:00:00.000000Z"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<K, T> {
    event_type: EventType,
    key: K,
    data: T,
    event_created_at: DateTime<Utc>,
}

impl<K, T> Envelope<K, T> {
    /// Wrap `data` under `key`, stamped with the current wall-clock time.
    pub fn new(event_type: EventType, key: K, data: T) -> Self {
        Self {
            event_type,
            key,
            data,
            event_created_at: Utc::now(),
        }
    }

    /// Shorthand for an envelope of kind `Create`.
    pub fn create(key: K, data: T) -> Self {
        Self::new(EventType::Create, key, data)
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn event_created_at(&self) -> DateTime<Utc> {
        self.event_created_at
    }

    /// Consume the envelope, keeping only the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}
