//! Event kinds carried in an envelope's type tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of event an envelope announces.
///
/// Every declared kind has a stable wire tag. Tags this build does not know
/// about (a newer producer, a typo on the wire) decode into `Unrecognized`
/// with the raw tag preserved, so consumers can log and skip them instead of
/// failing the whole frame.
///
/// Adding a kind means adding a variant here, its tag in `as_str`/`From<String>`,
/// and an arm in the dispatcher's match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A new message was created.
    Create,
    /// A tag not declared by this build.
    Unrecognized(String),
}

impl EventType {
    /// Wire tag for the `Create` kind.
    pub const CREATE: &'static str = "CREATE";

    /// The wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Create => Self::CREATE,
            EventType::Unrecognized(tag) => tag,
        }
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::CREATE => EventType::Create,
            _ => EventType::Unrecognized(tag),
        }
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        EventType::from(tag.to_string())
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        match kind {
            EventType::Create => EventType::CREATE.to_string(),
            EventType::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
