//! The unit handed to and received from a transport.

/// One transport unit: an opaque payload addressed to a channel.
///
/// The pipeline puts an encoded envelope in `payload`; the transport never
/// looks inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Unique identifier, used for ack/nack.
    pub id: String,
    /// Logical channel the frame was sent on.
    pub channel: String,
    /// Encoded envelope.
    pub payload: Vec<u8>,
    /// Transport headers (content type, event type, ...).
    pub headers: Vec<(String, String)>,
}

impl Frame {
    pub fn new(id: impl Into<String>, channel: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            channel: channel.into(),
            payload,
            headers: Vec::new(),
        }
    }

    /// Create a frame with a string payload.
    pub fn with_string_payload(
        id: impl Into<String>,
        channel: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self::new(id, channel, payload.into().into_bytes())
    }

    /// Add a header to the frame.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// First value of the named header, if present.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
