//! Producer entry point: request → message → publisher.

use tracing::debug;

use crate::bus::Sender;
use crate::domain::{Message, MessageRequest};
use crate::publisher::MessagePublisher;

use super::error::ProduceError;

/// Accepts produce requests from the outside world.
///
/// Completion carries no value: `Ok(())` means the publisher returned,
/// whether or not the transport accepted the frame. Faults from the
/// publisher are passed through.
pub trait ProducerService: Send + Sync {
    fn produce_message(&self, request: MessageRequest) -> Result<(), ProduceError>;

    /// Channel messages are published on.
    fn channel(&self) -> &str;
}

/// [`ProducerService`] backed by a [`MessagePublisher`].
///
/// Stateless between calls, so a single instance behind an `Arc` can serve
/// concurrent requests.
pub struct MessageProducer<S> {
    publisher: MessagePublisher<S>,
}

impl<S: Sender> MessageProducer<S> {
    pub fn new(publisher: MessagePublisher<S>) -> Self {
        Self { publisher }
    }
}

impl<S: Sender> ProducerService for MessageProducer<S> {
    fn produce_message(&self, request: MessageRequest) -> Result<(), ProduceError> {
        let message = Message::from(request);
        let message = self.publisher.create_message(message)?;
        debug!(message_id = message.message_id, "Produce request completed");

        Ok(())
    }

    fn channel(&self) -> &str {
        self.publisher.channel()
    }
}
