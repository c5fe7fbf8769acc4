//! HTTP producer integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use message_pipeline::bus::{Frame, InMemoryQueue, Sender, TransportError};
use message_pipeline::codec::Codec;
use message_pipeline::domain::{Message, MessageRequest};
use message_pipeline::envelope::{Envelope, EventType};
use message_pipeline::producer::{self, MessageProducer, ProduceError, ProducerService};
use message_pipeline::publisher::{MessagePublisher, PublisherConfig};
use serde_json::json;

/// Always faults, standing in for an unreachable broker.
struct DownSender;

impl Sender for DownSender {
    fn send(&self, _channel: &str, _frame: Frame) -> Result<bool, TransportError> {
        Err(TransportError::ConnectionFailed("broker down".into()))
    }
}

/// Blocks inside `send` until the test releases it.
struct GatedSender {
    entered: Mutex<Option<tokio::sync::oneshot::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl Sender for GatedSender {
    fn send(&self, _channel: &str, _frame: Frame) -> Result<bool, TransportError> {
        if let Some(entered) = self.entered.lock().unwrap().take() {
            let _ = entered.send(());
        }
        let _ = self
            .release
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5));
        Ok(true)
    }
}

/// Panics on every request.
struct PanickingProducer;

impl ProducerService for PanickingProducer {
    fn produce_message(&self, _request: MessageRequest) -> Result<(), ProduceError> {
        panic!("producer crashed")
    }

    fn channel(&self) -> &str {
        "messages"
    }
}

fn producer_on<S: Sender + 'static>(sender: S) -> Arc<MessageProducer<S>> {
    Arc::new(MessageProducer::new(MessagePublisher::new(
        sender,
        PublisherConfig::default(),
    )))
}

/// Bind to port 0 and return the actual address.
async fn start_server<P: ProducerService + 'static>(producer: Arc<P>) -> String {
    let app = producer::router(producer);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let base = start_server(producer_on(InMemoryQueue::new())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "channel": "messages" }));
}

#[tokio::test]
async fn produce_publishes_envelope() {
    let queue = InMemoryQueue::new();
    let base = start_server(producer_on(queue.clone())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "messageId": 42, "message": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let frames = queue.frames("messages");
    assert_eq!(frames.len(), 1);
    let envelope: Envelope<i64, Message> = Codec::Json.decode(&frames[0].payload).unwrap();
    assert_eq!(envelope.event_type(), &EventType::Create);
    assert_eq!(*envelope.key(), 42);
    assert_eq!(envelope.data(), &Message::new(42, "hello"));
}

#[tokio::test]
async fn declined_hand_off_still_returns_204() {
    let queue = InMemoryQueue::bounded(0);
    let base = start_server(producer_on(queue.clone())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "messageId": 1, "message": "dropped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert!(queue.is_empty("messages"));
}

#[tokio::test]
async fn transport_fault_returns_502() {
    let base = start_server(producer_on(DownSender)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "messageId": 1, "message": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("broker down"));
}

#[tokio::test]
async fn blank_message_is_published_verbatim() {
    let queue = InMemoryQueue::new();
    let base = start_server(producer_on(queue.clone())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "messageId": 1, "message": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let frames = queue.frames("messages");
    assert_eq!(frames.len(), 1);
    let envelope: Envelope<i64, Message> = Codec::Json.decode(&frames[0].payload).unwrap();
    assert_eq!(envelope.data(), &Message::new(1, "  "));
}

#[tokio::test]
async fn missing_identifier_is_rejected() {
    let queue = InMemoryQueue::new();
    let base = start_server(producer_on(queue.clone())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "message": "no id" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    assert!(queue.is_empty("messages"));
}

#[tokio::test]
async fn slow_publish_does_not_stall_other_requests() {
    let (entered_tx, entered_rx) = tokio::sync::oneshot::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let base = start_server(producer_on(GatedSender {
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(release_rx),
    }))
    .await;
    let client = reqwest::Client::new();

    let produce = tokio::spawn({
        let client = client.clone();
        let url = format!("{base}/produce");
        async move {
            client
                .post(url)
                .json(&json!({ "messageId": 1, "message": "slow" }))
                .send()
                .await
                .unwrap()
                .status()
        }
    });
    entered_rx.await.unwrap();

    let started = Instant::now();
    let health = client
        .get(format!("{base}/health"))
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert!(started.elapsed() < Duration::from_secs(2));

    release_tx.send(()).unwrap();
    assert_eq!(produce.await.unwrap(), 204);
}

#[tokio::test]
async fn crashed_publish_returns_500() {
    let base = start_server(Arc::new(PanickingProducer)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/produce"))
        .json(&json!({ "messageId": 1, "message": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("publish aborted"));
}
