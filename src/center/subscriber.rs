use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::bus::DomainEvent;
use crate::catalog;
use crate::settings::DispatchFilter;

use super::delivery::DeliverySink;
use super::{Notification, NotificationCenter};

impl NotificationCenter {
    /// Spawn the dispatch worker: a single-owner loop that drains the bus
    /// subscription and applies the current filter to every event.
    ///
    /// The worker exits when the bus is dropped. A lagged receiver only costs
    /// the overwritten events; dispatch resumes with the next one.
    pub fn start(
        &self,
        mut rx: broadcast::Receiver<DomainEvent>,
        filter: Arc<RwLock<DispatchFilter>>,
        sinks: Vec<Arc<dyn DeliverySink>>,
    ) -> JoinHandle<()> {
        let center = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => center.dispatch(&event, &filter, &sinks).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("notification dispatch lagged, dropped {n} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    async fn dispatch(
        &self,
        event: &DomainEvent,
        filter: &RwLock<DispatchFilter>,
        sinks: &[Arc<dyn DeliverySink>],
    ) {
        let priority = catalog::priority_for(&event.event_type);

        // Snapshot filter decisions before any await; the guard must not be
        // held across sink calls.
        let (blocked, sink_enabled): (bool, Vec<bool>) = {
            let f = filter.read().expect("dispatch filter lock poisoned");
            (
                f.blocks(&event.event_type, priority),
                sinks.iter().map(|s| f.delivery_enabled(s.method())).collect(),
            )
        };

        // Filtered events vanish without a trace.
        if blocked {
            return;
        }

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            event_type: event.event_type.clone(),
            category: catalog::categories_for(&event.event_type).first().copied(),
            title: catalog::title_for(&event.event_type).to_string(),
            priority,
            read: false,
            created_at: Utc::now().to_rfc3339(),
        };

        self.post(notification.clone());

        for (sink, enabled) in sinks.iter().zip(sink_enabled) {
            if !enabled {
                continue;
            }
            if let Err(e) = sink.deliver(&notification).await {
                tracing::warn!("delivery sink failed for {}: {e}", notification.event_type);
            }
        }
    }
}
