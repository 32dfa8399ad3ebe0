//! Fan-out of state changes to connected clients
//!
//! Domain events are typed here; the SSE and WebSocket transports in `api`
//! only translate them to frames.

use crate::store::LegislationEntry;
use futures::stream::{self, Stream};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

/// Buffered pushes per subscriber before the slowest one starts lagging
const CHANNEL_CAPACITY: usize = 128;

/// Named stream a push is delivered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    LegislationUpdated,
    FeedbackCountUpdated,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::LegislationUpdated, Topic::FeedbackCountUpdated];

    /// Wire name used as the SSE `event:` field and the WebSocket `event` key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Topic::LegislationUpdated => "legislationUpdated",
            Topic::FeedbackCountUpdated => "feedbackCountUpdated",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownTopic(s.to_string()))
    }
}

/// State change pushed to every subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// The full legislation collection after a vote
    LegislationUpdated(Vec<LegislationEntry>),
    /// The feedback counter after a submission
    FeedbackCountUpdated(u64),
}

impl PushEvent {
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            PushEvent::LegislationUpdated(_) => Topic::LegislationUpdated,
            PushEvent::FeedbackCountUpdated(_) => Topic::FeedbackCountUpdated,
        }
    }

    /// JSON payload sent under the topic
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            PushEvent::LegislationUpdated(entries) => {
                serde_json::to_value(entries).unwrap_or(Value::Null)
            }
            PushEvent::FeedbackCountUpdated(count) => Value::from(*count),
        }
    }

    /// Rebuild an event from a topic name and its JSON payload text
    ///
    /// # Errors
    ///
    /// `UnknownTopic` for a name outside `Topic::ALL`, `Payload` when the
    /// data does not match the topic's payload shape.
    pub fn decode(topic: &str, data: &str) -> Result<Self, DecodeError> {
        match topic.parse::<Topic>()? {
            Topic::LegislationUpdated => {
                Ok(PushEvent::LegislationUpdated(serde_json::from_str(data)?))
            }
            Topic::FeedbackCountUpdated => {
                Ok(PushEvent::FeedbackCountUpdated(serde_json::from_str(data)?))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Sink for domain events. Delivery is fire-and-forget.
pub trait Publisher: Send + Sync {
    fn publish(&self, event: PushEvent);
}

impl<T: Publisher + ?Sized> Publisher for Arc<T> {
    fn publish(&self, event: PushEvent) {
        (**self).publish(event);
    }
}

type SubscriberSet = Arc<Mutex<HashSet<Uuid>>>;

/// In-process broadcaster backed by a tokio broadcast channel
pub struct Broadcaster {
    tx: broadcast::Sender<PushEvent>,
    subscribers: SubscriberSet,
    closed: watch::Sender<bool>,
}

impl Broadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (closed, _) = watch::channel(false);
        Self {
            tx,
            subscribers: Arc::new(Mutex::new(HashSet::new())),
            closed,
        }
    }

    /// Register a new subscriber. It is removed again when the returned
    /// `Subscription` is dropped.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        let rx = self.tx.subscribe();
        let total = {
            let mut set = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            set.insert(id);
            set.len()
        };
        tracing::info!(subscriber = %id, total, "Subscriber connected");

        Subscription {
            id,
            rx,
            closed: self.closed.subscribe(),
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// End every open subscription, current and future. Used on shutdown so
    /// long-lived push streams do not hold the server open.
    pub fn close(&self) {
        self.closed.send_replace(true);
        tracing::info!(subscribers = self.subscriber_count(), "Push channel closed");
    }

    /// Number of currently connected subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for Broadcaster {
    fn publish(&self, event: PushEvent) {
        let topic = event.topic();
        // Err only means nobody is listening right now
        match self.tx.send(event) {
            Ok(receivers) => tracing::info!(%topic, receivers, "Published"),
            Err(_) => tracing::debug!(%topic, "Published with no subscribers"),
        }
    }
}

/// One connected subscriber's view of the channel
pub struct Subscription {
    id: Uuid,
    rx: broadcast::Receiver<PushEvent>,
    closed: watch::Receiver<bool>,
    subscribers: SubscriberSet,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next event in publish order, or `None` once the broadcaster is closed
    /// or gone. Events lost to lag are skipped.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        loop {
            let received = tokio::select! {
                biased;
                _ = self.closed.wait_for(|closed| *closed) => return None,
                received = self.rx.recv() => received,
            };
            match received {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(subscriber = %self.id, skipped, "Subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Turn the subscription into a stream; dropping the stream unsubscribes
    pub fn into_stream(self) -> impl Stream<Item = PushEvent> + Send {
        stream::unfold(self, |mut sub| async move {
            let event = sub.recv().await?;
            Some((event, sub))
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let total = {
            let mut set = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            set.remove(&self.id);
            set.len()
        };
        tracing::info!(subscriber = %self.id, total, "Subscriber disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Votes;
    use futures::StreamExt;

    fn entry(id: &str, up: u64) -> LegislationEntry {
        LegislationEntry {
            id: id.to_string(),
            title: "Title".to_string(),
            technical_summary: "Technical".to_string(),
            plain_summary: "Plain".to_string(),
            votes: Votes::new(up, 0),
        }
    }

    #[test]
    fn test_topic_wire_names() {
        assert_eq!(Topic::LegislationUpdated.as_str(), "legislationUpdated");
        assert_eq!(Topic::FeedbackCountUpdated.as_str(), "feedbackCountUpdated");
        assert_eq!(
            "feedbackCountUpdated".parse::<Topic>().unwrap(),
            Topic::FeedbackCountUpdated
        );
        assert!(matches!(
            "stateChange".parse::<Topic>(),
            Err(DecodeError::UnknownTopic(_))
        ));
    }

    #[test]
    fn test_decode_from_payload_text() {
        let event = PushEvent::LegislationUpdated(vec![entry("leg1", 3)]);
        let text = event.payload().to_string();
        let decoded = PushEvent::decode(event.topic().as_str(), &text).unwrap();
        assert_eq!(decoded, event);

        assert_eq!(
            PushEvent::decode("feedbackCountUpdated", "7").unwrap(),
            PushEvent::FeedbackCountUpdated(7)
        );
        assert!(matches!(
            PushEvent::decode("feedbackCountUpdated", "\"seven\""),
            Err(DecodeError::Payload(_))
        ));
    }

    #[tokio::test]
    async fn test_fan_out_to_every_subscriber() {
        let broadcaster = Broadcaster::new();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        assert_ne!(first.id(), second.id());

        broadcaster.publish(PushEvent::FeedbackCountUpdated(1));

        assert_eq!(first.recv().await, Some(PushEvent::FeedbackCountUpdated(1)));
        assert_eq!(second.recv().await, Some(PushEvent::FeedbackCountUpdated(1)));
    }

    #[tokio::test]
    async fn test_per_subscriber_order_follows_publish_order() {
        let broadcaster = Broadcaster::new();
        let sub = broadcaster.subscribe();

        for count in 1..=5 {
            broadcaster.publish(PushEvent::FeedbackCountUpdated(count));
        }

        let received: Vec<_> = sub.into_stream().take(5).collect().await;
        let expected: Vec<_> = (1..=5).map(PushEvent::FeedbackCountUpdated).collect();
        assert_eq!(received, expected);
    }

    #[test]
    fn test_subscriber_set_tracks_connect_and_disconnect() {
        let broadcaster = Broadcaster::new();
        assert_eq!(broadcaster.subscriber_count(), 0);

        let first = broadcaster.subscribe();
        let second = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(first);
        assert_eq!(broadcaster.subscriber_count(), 1);

        drop(second.into_stream());
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_close_ends_subscriptions() {
        let broadcaster = Broadcaster::new();
        let mut before = broadcaster.subscribe();

        broadcaster.close();
        assert_eq!(before.recv().await, None);

        let mut after = broadcaster.subscribe();
        broadcaster.publish(PushEvent::FeedbackCountUpdated(1));
        assert_eq!(after.recv().await, None);
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(PushEvent::FeedbackCountUpdated(1));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_lagged_subscriber_keeps_newest_events() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.subscribe();

        let total = u64::try_from(CHANNEL_CAPACITY).unwrap() + 10;
        for count in 1..=total {
            broadcaster.publish(PushEvent::FeedbackCountUpdated(count));
        }

        // The oldest ten fell out of the buffer
        assert_eq!(sub.recv().await, Some(PushEvent::FeedbackCountUpdated(11)));
    }
}
