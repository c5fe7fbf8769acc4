//! Domain payloads: the message that travels inside an envelope and the
//! request shape it is built from.

mod message;
mod request;

pub use message::Message;
pub use request::MessageRequest;
