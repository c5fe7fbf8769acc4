//! Pipeline integration tests: producer → transport → dispatcher.

mod support;
mod end_to_end;
