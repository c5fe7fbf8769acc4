//! Wraps messages in envelopes and hands them to the transport.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::bus::{Frame, Sender};
use crate::codec::{Codec, CONTENT_TYPE_HEADER};
use crate::domain::Message;
use crate::envelope::Envelope;

use super::error::PublishError;

/// Header carrying the envelope's event type, so transports can route or
/// filter without decoding the payload.
pub const EVENT_TYPE_HEADER: &str = "event-type";

/// Channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "messages";

/// Where and how the publisher sends envelopes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Logical channel every envelope is sent on.
    pub channel: String,
    /// Codec used for the frame payload.
    pub codec: Codec,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            codec: Codec::default(),
        }
    }
}

impl PublisherConfig {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ..Self::default()
        }
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }
}

/// Publishes messages as `CREATE` envelopes on a single configured channel.
///
/// Holds no per-call state; one instance can serve concurrent publishes.
///
/// ## Example
///
/// ```
/// use message_pipeline::bus::InMemoryQueue;
/// use message_pipeline::domain::Message;
/// use message_pipeline::publisher::{MessagePublisher, PublisherConfig};
///
/// let queue = InMemoryQueue::new();
/// let publisher = MessagePublisher::new(queue.clone(), PublisherConfig::new("messages"));
///
/// let message = publisher.create_message(Message::new(42, "hello")).unwrap();
/// assert_eq!(message.message_id, 42);
/// assert_eq!(queue.len("messages"), 1);
/// ```
pub struct MessagePublisher<S> {
    sender: S,
    config: PublisherConfig,
}

impl<S: Sender> MessagePublisher<S> {
    pub fn new(sender: S, config: PublisherConfig) -> Self {
        Self { sender, config }
    }

    pub fn channel(&self) -> &str {
        &self.config.channel
    }

    /// Wrap `message` in a `CREATE` envelope keyed by its id and send it.
    ///
    /// The message is handed back whether or not the transport accepted the
    /// frame: a declined hand-off is logged as a warning and is not an error.
    /// A transport fault is returned unchanged inside
    /// [`PublishError::Transport`].
    pub fn create_message(&self, message: Message) -> Result<Message, PublishError> {
        let channel = self.config.channel.as_str();
        info!(message_id = message.message_id, channel, "Producing message");

        let envelope = Envelope::create(message.id(), message);
        let frame = self.frame_for(&envelope)?;
        debug!(
            message_id = envelope.key(),
            frame_id = %frame.id,
            created_at = %envelope.event_created_at(),
            "Envelope encoded"
        );

        let sent = self
            .sender
            .send(channel, frame)
            .map_err(|source| PublishError::Transport {
                channel: channel.to_string(),
                source,
            })?;

        if sent {
            info!(message_id = envelope.key(), channel, "Message sent");
        } else {
            warn!(message_id = envelope.key(), channel, "Could not send message");
        }

        Ok(envelope.into_data())
    }

    fn frame_for(&self, envelope: &Envelope<i64, Message>) -> Result<Frame, PublishError> {
        let payload = self.config.codec.encode(envelope)?;
        let id = format!(
            "{}-{}-{}",
            self.config.channel,
            envelope.key(),
            unique_suffix()
        );

        Ok(Frame::new(id, self.config.channel.clone(), payload)
            .with_header(CONTENT_TYPE_HEADER, self.config.codec.content_type())
            .with_header(EVENT_TYPE_HEADER, envelope.event_type().as_str()))
    }
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}
