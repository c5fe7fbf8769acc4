//! Test doubles shared by the pipeline suites.

use std::sync::{Arc, Mutex};

use message_pipeline::bus::{Frame, Sender, TransportError};
use message_pipeline::consumer::{HandlerError, MessageHandler};
use message_pipeline::domain::Message;

/// Records the id of every message handed to `on_create`.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    pub created: Arc<Mutex<Vec<i64>>>,
}

impl RecordingHandler {
    pub fn created(&self) -> Vec<i64> {
        self.created.lock().unwrap().clone()
    }
}

impl MessageHandler for RecordingHandler {
    fn on_create(&self, message: &Message) -> Result<(), HandlerError> {
        self.created.lock().unwrap().push(message.message_id);
        Ok(())
    }
}

/// How a [`SpySender`] answers each send.
#[derive(Clone, Copy)]
pub enum Reply {
    Accept,
    Decline,
    Fault,
}

/// Captures every frame and answers according to `reply`.
#[derive(Clone)]
pub struct SpySender {
    pub sent: Arc<Mutex<Vec<(String, Frame)>>>,
    reply: Reply,
}

impl SpySender {
    pub fn new(reply: Reply) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    pub fn sent(&self) -> Vec<(String, Frame)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Sender for SpySender {
    fn send(&self, channel: &str, frame: Frame) -> Result<bool, TransportError> {
        self.sent.lock().unwrap().push((channel.to_string(), frame));
        match self.reply {
            Reply::Accept => Ok(true),
            Reply::Decline => Ok(false),
            Reply::Fault => Err(TransportError::ConnectionFailed("broker unreachable".into())),
        }
    }
}
