//! Inbound half of a transport.

use super::error::TransportError;
use super::frame::Frame;

/// Trait for receiving frames from a subscribed channel.
///
/// This is a pull-based interface. Ordering and redelivery are whatever the
/// transport provides; consumers must not rely on either.
pub trait Subscriber: Send + Sync {
    /// Poll for the next frame, blocking until one is available or timeout.
    fn poll(&self, timeout_ms: u64) -> Result<Option<Frame>, TransportError>;

    /// Acknowledge that a frame has been processed.
    fn ack(&self, frame_id: &str) -> Result<(), TransportError>;

    /// Reject a frame (will be redelivered or sent to dead letter queue).
    fn nack(&self, frame_id: &str, reason: &str) -> Result<(), TransportError>;
}

/// Trait for subscribers that can create independent subscriber instances.
pub trait Subscribable: Subscriber + Sized {
    /// Create a new independent subscriber on the same channel.
    ///
    /// The new subscriber has its own read position, allowing multiple
    /// independent consumers of the same stream.
    fn new_subscriber(&self) -> Self;
}
