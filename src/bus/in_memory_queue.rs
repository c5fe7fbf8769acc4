//! In-memory transport for testing and single-process scenarios.
//!
//! This module provides a thread-safe in-memory queue that implements
//! `Sender`, plus channel-bound subscribers implementing `Subscriber`,
//! useful for:
//! - Unit and integration testing without a broker
//! - Single-process deployments (producer and consumer in one binary)
//! - Development and prototyping

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::trace;

use super::{Frame, Sender, Subscribable, Subscriber, TransportError};

#[derive(Default)]
struct Shared {
    /// Append-only log per channel
    channels: RwLock<HashMap<String, Vec<Frame>>>,
    /// Acknowledged frame IDs
    acked: Mutex<Vec<String>>,
    /// Rejected frame IDs with reasons
    rejected: Mutex<Vec<(String, String)>>,
    closed: AtomicBool,
}

/// In-memory transport.
///
/// Features:
/// - Thread-safe (can be shared across threads via `Clone`)
/// - One append-only log per channel
/// - Optional per-channel capacity: a channel already holding `capacity`
///   frames declines further sends with `Ok(false)`
/// - `close()` turns every later send and poll into `TransportError::Closed`
///
/// ## Example
///
/// ```
/// use message_pipeline::bus::{Frame, InMemoryQueue, Sender, Subscriber};
///
/// let queue = InMemoryQueue::new();
/// let subscriber = queue.subscriber("messages");
///
/// assert!(queue.send("messages", Frame::with_string_payload("f-1", "messages", "{}")).unwrap());
///
/// let frame = subscriber.poll(100).unwrap();
/// assert_eq!(frame.unwrap().id, "f-1");
/// ```
#[derive(Clone, Default)]
pub struct InMemoryQueue {
    shared: Arc<Shared>,
    capacity: Option<usize>,
}

impl InMemoryQueue {
    /// Create an unbounded in-memory queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue whose channels each hold at most `capacity` frames.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            capacity: Some(capacity),
        }
    }

    /// Subscribe to a channel, starting from its first frame.
    pub fn subscriber(&self, channel: impl Into<String>) -> ChannelSubscriber {
        ChannelSubscriber {
            shared: Arc::clone(&self.shared),
            channel: channel.into(),
            position: Mutex::new(0),
        }
    }

    /// All frames sent on a channel, in send order.
    pub fn frames(&self, channel: &str) -> Vec<Frame> {
        let channels = self
            .shared
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        channels.get(channel).cloned().unwrap_or_default()
    }

    /// Number of frames sent on a channel.
    pub fn len(&self, channel: &str) -> usize {
        let channels = self
            .shared
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        channels.get(channel).map_or(0, Vec::len)
    }

    /// Check if a channel has no frames.
    pub fn is_empty(&self, channel: &str) -> bool {
        self.len(channel) == 0
    }

    /// Get acknowledged frame IDs.
    pub fn acknowledged(&self) -> Vec<String> {
        self.shared
            .acked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get rejected frame IDs with their reasons.
    pub fn rejected(&self) -> Vec<(String, String)> {
        self.shared
            .rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shut the transport down. Later sends and polls fail hard.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Clear all frames and ack records (useful for test cleanup).
    pub fn clear(&self) {
        self.shared
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.shared
            .acked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.shared
            .rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sender for InMemoryQueue {
    fn send(&self, channel: &str, frame: Frame) -> Result<bool, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        let mut channels = self
            .shared
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let log = channels.entry(channel.to_string()).or_default();

        if self.capacity.is_some_and(|capacity| log.len() >= capacity) {
            trace!(channel, frame_id = %frame.id, "channel at capacity, declining frame");
            return Ok(false);
        }

        log.push(frame);
        Ok(true)
    }
}

/// A subscriber bound to one channel of an [`InMemoryQueue`].
///
/// Each subscriber tracks its own read position, so several subscribers on
/// the same channel each see every frame (fan-out).
pub struct ChannelSubscriber {
    shared: Arc<Shared>,
    channel: String,
    position: Mutex<usize>,
}

impl ChannelSubscriber {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Get the current read position.
    pub fn current_position(&self) -> usize {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the read position to the beginning of the channel.
    pub fn reset_position(&self) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = 0;
    }

    fn next_frame(&self) -> Option<Frame> {
        let channels = self
            .shared
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut pos = self.position.lock().unwrap_or_else(PoisonError::into_inner);

        let frame = channels.get(&self.channel)?.get(*pos)?.clone();
        *pos += 1;
        Some(frame)
    }
}

impl Subscriber for ChannelSubscriber {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Frame>, TransportError> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            if self.shared.closed.load(Ordering::SeqCst) {
                return Err(TransportError::Closed);
            }

            if let Some(frame) = self.next_frame() {
                return Ok(Some(frame));
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }

            // Small sleep to avoid busy-waiting
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    fn ack(&self, frame_id: &str) -> Result<(), TransportError> {
        self.shared
            .acked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame_id.to_string());
        Ok(())
    }

    fn nack(&self, frame_id: &str, reason: &str) -> Result<(), TransportError> {
        // No redelivery in memory; the frame stays in the log and the reason is recorded
        self.shared
            .rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((frame_id.to_string(), reason.to_string()));
        Ok(())
    }
}

impl Subscribable for ChannelSubscriber {
    fn new_subscriber(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            channel: self.channel.clone(),
            position: Mutex::new(0),
        }
    }
}
