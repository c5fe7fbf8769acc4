//! Envelope codecs: how an envelope becomes frame bytes.
//!
//! JSON is the default and matches the documented wire shape byte for byte
//! (`eventType`, `key`, `data`, `eventCreatedAt`). Bitcode is a compact
//! binary alternative for transports that do not need human-readable
//! payloads. Producer and consumer must agree on the codec; the publisher
//! stamps it into the frame's `content-type` header.

mod error;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

pub use error::CodecError;

/// Header carrying the codec's content type.
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// Serialization format used for envelopes on the wire.
///
/// Names parse case-insensitively, both through [`FromStr`] and when
/// deserialized from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Codec {
    #[default]
    Json,
    Bitcode,
}

impl Codec {
    pub fn encode<K, T>(&self, envelope: &Envelope<K, T>) -> Result<Vec<u8>, CodecError>
    where
        K: Serialize,
        T: Serialize,
    {
        match self {
            Codec::Json => Ok(serde_json::to_vec(envelope)?),
            Codec::Bitcode => Ok(bitcode::serialize(envelope)?),
        }
    }

    pub fn decode<K, T>(&self, bytes: &[u8]) -> Result<Envelope<K, T>, CodecError>
    where
        K: DeserializeOwned,
        T: DeserializeOwned,
    {
        match self {
            Codec::Json => Ok(serde_json::from_slice(bytes)?),
            Codec::Bitcode => Ok(bitcode::deserialize(bytes)?),
        }
    }

    /// MIME type written to the frame's `content-type` header.
    pub fn content_type(&self) -> &'static str {
        match self {
            Codec::Json => "application/json",
            Codec::Bitcode => "application/x-bitcode",
        }
    }

    /// Pick the codec matching a `content-type` header value.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/json" => Some(Codec::Json),
            "application/x-bitcode" => Some(Codec::Bitcode),
            _ => None,
        }
    }
}

impl FromStr for Codec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Codec::Json),
            "bitcode" => Ok(Codec::Bitcode),
            _ => Err(CodecError::UnknownCodec(s.to_string())),
        }
    }
}

impl TryFrom<String> for Codec {
    type Error = CodecError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Json => f.write_str("json"),
            Codec::Bitcode => f.write_str("bitcode"),
        }
    }
}
