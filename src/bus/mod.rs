//! Transport primitives: sending frames to a channel and subscribing to one.
//!
//! The pipeline treats the broker as opaque. Anything that can hand a frame
//! to a named channel (`Sender`) and hand frames back from one
//! (`Subscriber`) can carry envelopes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐            ┌──────────────────────┐
//! │   MessagePublisher   │            │      Dispatcher      │
//! │  envelope → Frame    │            │  Frame → envelope    │
//! └──────────────────────┘            └──────────────────────┘
//!            │                                   ▲
//!            ▼                                   │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Sender + Subscriber Traits                    │
//! │  Sender: send(channel, frame) -> bool                       │
//! │  Subscriber: poll(timeout) / ack(id) / nack(id)             │
//! └─────────────────────────────────────────────────────────────┘
//!          │                  │                     │
//!          ▼                  ▼                     ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────────────┐
//! │InMemoryQueue│    │ KafkaQueue  │    │ NatsJetStream       │
//! │ (included)  │    │ (external)  │    │    (external)       │
//! └─────────────┘    └─────────────┘    └─────────────────────┘
//! ```

mod error;
mod frame;
mod in_memory_queue;
mod sender;
mod subscriber;

pub use error::TransportError;
pub use frame::Frame;
pub use in_memory_queue::{ChannelSubscriber, InMemoryQueue};
pub use sender::Sender;
pub use subscriber::{Subscribable, Subscriber};
