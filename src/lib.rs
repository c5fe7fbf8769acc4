//! Typed event envelopes over a pluggable broker.
//!
//! A producer wraps each [`domain::Message`] in an [`envelope::Envelope`]
//! and hands it to a transport on a named channel; a consumer subscribes to
//! that channel and dispatches each envelope by its event type.
//!
//! ```text
//! request → producer → publisher (envelope) → bus::Sender → [broker]
//!                                                              │
//!             handler ← dispatcher (match event_type) ← bus::Subscriber
//! ```
//!
//! Delivery is best effort. A publish reports whether the transport accepted
//! the frame locally; it is not a broker acknowledgment, and nothing here
//! orders, deduplicates or retries.

pub mod codec;
pub mod domain;
pub mod envelope;
pub mod settings;
pub mod telemetry;

#[cfg(feature = "bus")]
pub mod bus;
#[cfg(feature = "bus")]
pub mod consumer;
#[cfg(feature = "bus")]
pub mod producer;
#[cfg(feature = "bus")]
pub mod publisher;

pub use codec::{Codec, CodecError};
pub use settings::PipelineConfig;
pub use domain::{Message, MessageRequest};
pub use envelope::{Envelope, EventType};

#[cfg(feature = "bus")]
pub use consumer::{DispatchOutcome, Dispatcher, MessageHandler};
#[cfg(feature = "bus")]
pub use producer::{MessageProducer, ProduceError, ProducerService};
#[cfg(feature = "bus")]
pub use publisher::{MessagePublisher, PublishError, PublisherConfig};
