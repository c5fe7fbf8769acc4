//! Outbound half of a transport.

use super::error::TransportError;
use super::frame::Frame;

/// Hands frames to a transport for a named channel.
///
/// The boolean is the local hand-off result: `true` when the transport
/// accepted the frame into its outbound pipeline, `false` when it declined
/// (buffer full, not ready). Neither value says anything about broker-side
/// durability. Hard failures are returned as `Err`.
///
/// Implementations might include:
/// - `InMemoryQueue` - For testing and single-process scenarios
/// - a Kafka producer keyed by channel
/// - a NATS publisher mapping channels to subjects
pub trait Sender: Send + Sync {
    fn send(&self, channel: &str, frame: Frame) -> Result<bool, TransportError>;
}

impl<S: Sender + ?Sized> Sender for std::sync::Arc<S> {
    fn send(&self, channel: &str, frame: Frame) -> Result<bool, TransportError> {
        (**self).send(channel, frame)
    }
}
