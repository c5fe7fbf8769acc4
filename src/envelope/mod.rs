//! Event envelope: the contract shared by producers and consumers.

mod envelope;
mod event_type;

pub use envelope::Envelope;
pub use event_type::EventType;
