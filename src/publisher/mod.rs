//! Publisher: domain message → envelope → transport.

mod error;
mod message_publisher;

pub use error::PublishError;
pub use message_publisher::{
    MessagePublisher, PublisherConfig, DEFAULT_CHANNEL, EVENT_TYPE_HEADER,
};
