//! Producer entry point: the seam between an external request and the
//! publisher.
//!
//! `MessageProducer` turns a [`MessageRequest`](crate::domain::MessageRequest)
//! into a [`Message`](crate::domain::Message) and publishes it. The `http`
//! feature exposes it as `POST /produce`.

mod error;
mod service;

pub use error::ProduceError;
pub use service::{MessageProducer, ProducerService};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
