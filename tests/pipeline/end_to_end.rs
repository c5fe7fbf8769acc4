//! Producer and consumer joined by the in-memory transport.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use message_pipeline::bus::InMemoryQueue;
use message_pipeline::codec::Codec;
use message_pipeline::consumer::{self, Dispatcher};
use message_pipeline::domain::MessageRequest;
use message_pipeline::producer::{MessageProducer, ProducerService};
use message_pipeline::publisher::{MessagePublisher, PublisherConfig};

use crate::support::RecordingHandler;

fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn published_messages_reach_the_handler() {
    let queue = InMemoryQueue::new();
    let handler = RecordingHandler::default();
    let handle = consumer::subscribe(
        Arc::new(Dispatcher::new(handler.clone())),
        queue.subscriber("messages"),
        Duration::from_millis(10),
    );

    let producer = MessageProducer::new(MessagePublisher::new(
        queue.clone(),
        PublisherConfig::default(),
    ));
    producer.produce_message(MessageRequest::new(1, "first")).unwrap();
    producer.produce_message(MessageRequest::new(2, "second")).unwrap();

    wait_until(|| handler.created().len() == 2);
    let stats = handle.stop();

    assert_eq!(handler.created(), vec![1, 2]);
    assert_eq!(stats.handled, 2);
    assert_eq!(queue.acknowledged().len(), 2);
}

#[test]
fn bitcode_pipeline_round_trips() {
    let queue = InMemoryQueue::new();
    let handler = RecordingHandler::default();
    let handle = consumer::subscribe(
        Arc::new(Dispatcher::new(handler.clone()).with_codec(Codec::Bitcode)),
        queue.subscriber("binary"),
        Duration::from_millis(10),
    );

    let producer = MessageProducer::new(MessagePublisher::new(
        queue.clone(),
        PublisherConfig::new("binary").with_codec(Codec::Bitcode),
    ));
    producer.produce_message(MessageRequest::new(77, "packed")).unwrap();

    wait_until(|| !handler.created().is_empty());
    handle.stop();

    assert_eq!(handler.created(), vec![77]);
}

#[test]
fn other_channels_are_not_consumed() {
    let queue = InMemoryQueue::new();
    let handler = RecordingHandler::default();
    let handle = consumer::subscribe(
        Arc::new(Dispatcher::new(handler.clone())),
        queue.subscriber("messages"),
        Duration::from_millis(10),
    );

    let producer = MessageProducer::new(MessagePublisher::new(
        queue.clone(),
        PublisherConfig::new("elsewhere"),
    ));
    producer.produce_message(MessageRequest::new(5, "lost")).unwrap();

    thread::sleep(Duration::from_millis(100));
    let stats = handle.stop();

    assert!(handler.created().is_empty());
    assert_eq!(stats.handled, 0);
    assert_eq!(queue.len("elsewhere"), 1);
}

#[test]
fn fan_out_to_independent_subscribers() {
    let queue = InMemoryQueue::new();
    let first = RecordingHandler::default();
    let second = RecordingHandler::default();

    let subscriber = queue.subscriber("messages");
    let other = message_pipeline::bus::Subscribable::new_subscriber(&subscriber);
    let h1 = consumer::subscribe(
        Arc::new(Dispatcher::new(first.clone())),
        subscriber,
        Duration::from_millis(10),
    );
    let h2 = consumer::subscribe(
        Arc::new(Dispatcher::new(second.clone())),
        other,
        Duration::from_millis(10),
    );

    let producer = MessageProducer::new(MessagePublisher::new(
        queue.clone(),
        PublisherConfig::default(),
    ));
    producer.produce_message(MessageRequest::new(3, "both")).unwrap();

    wait_until(|| first.created().len() == 1 && second.created().len() == 1);
    h1.stop();
    h2.stop();

    assert_eq!(first.created(), vec![3]);
    assert_eq!(second.created(), vec![3]);
}
