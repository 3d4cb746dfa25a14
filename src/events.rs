//! Cross-component error notification
//!
//! A single [`EventBus`] is created by the service factory at start-up and
//! cloned into every component that publishes or subscribes. Clones share one
//! broadcast channel; there is no process-global instance.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::models::GenerationVariant;

/// Default number of buffered events per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    IdentityVerificationFailed {
        reason: String,
    },
    GenerationFailed {
        variant: GenerationVariant,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteEvent {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<SuiteEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it
    ///
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, kind: EventKind) -> usize {
        let event = SuiteEvent {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
        };
        self.sender.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SuiteEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Spawn a task that writes every event to the log as JSON
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn_event_logger(&self) -> JoinHandle<()> {
        let mut receiver = self.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(json) => log::info!("📣 event {json}"),
                        Err(e) => log::warn!("Failed to serialize event {}: {e}", event.id),
                    },
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("Event logger lagged, {skipped} events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::default();
        assert_eq!(
            bus.publish(EventKind::IdentityVerificationFailed {
                reason: "expired".to_string()
            }),
            0
        );
    }

    #[tokio::test]
    async fn test_clones_share_one_channel() {
        let bus = EventBus::new(8);
        let publisher = bus.clone();
        let mut receiver = bus.subscribe();

        let delivered = publisher.publish(EventKind::GenerationFailed {
            variant: GenerationVariant::Search,
            message: "boom".to_string(),
        });
        assert_eq!(delivered, 1);

        let event = receiver.recv().await.unwrap();
        assert_eq!(
            event.kind,
            EventKind::GenerationFailed {
                variant: GenerationVariant::Search,
                message: "boom".to_string(),
            }
        );
    }

    #[test]
    fn test_event_serializes_flat_with_type_tag() {
        let event = SuiteEvent {
            id: Uuid::nil(),
            occurred_at: Utc::now(),
            kind: EventKind::GenerationFailed {
                variant: GenerationVariant::Flowchart,
                message: "bad json".to_string(),
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "generation_failed");
        assert_eq!(value["variant"], "flowchart");
        assert_eq!(value["message"], "bad json");
    }
}
