use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

const BUS_CAPACITY: usize = 1024;

/// A single domain occurrence, e.g. `incident.created` or `change.approved`.
///
/// The payload is whatever the emitting operation wants consumers to see;
/// the notification center only ever inspects `event_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: String,
    pub seq: i64,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub created_at: String,
}

pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
    seq: AtomicI64,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self {
            tx,
            seq: AtomicI64::new(0),
        }
    }

    /// Publish a pre-built event onto the bus.
    ///
    /// Publishing with no live receivers is a normal condition (the client may
    /// not have attached the notification center yet), not an error.
    pub fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("event published with no receivers: {e}");
        }
    }

    /// Convenience: build and publish an event in one call.
    pub fn emit(&self, event_type: impl Into<String>, payload: serde_json::Value) -> DomainEvent {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let event = DomainEvent {
            id: Uuid::new_v4().to_string(),
            seq,
            event_type: event_type.into(),
            payload,
            created_at: Utc::now().to_rfc3339(),
        };
        self.publish(event.clone());
        event
    }

    /// Get a new receiver for this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
