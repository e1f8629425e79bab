//! DeskWire notification engine.
//!
//! The backend of the DeskWire ITSM client's notification feature. It handles:
//! - Domain event publication and fan-out
//! - The static event catalog (titles, priorities, categories)
//! - Persisted per-user notification settings
//! - Filtering events into the in-memory notification list the UI reads
//!
//! # Architecture
//!
//! Events flow from domain operations → `EventBus` → dispatch worker → center:
//! - `bus`: in-memory broadcast channel every domain operation emits into
//! - `catalog`: single source of truth for event metadata
//! - `settings`: persisted preferences and the dispatch filter derived from them
//! - `center`: the notification list, its dispatch worker, and delivery sinks
//! - `db`: local SQLite storage for settings
//!
//! Nothing here is global: a [`Notifier`] owns one assembled instance, and
//! tests build several side by side.

pub mod bus;
pub mod catalog;
pub mod center;
pub mod db;
pub mod settings;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub use bus::{DomainEvent, EventBus};
pub use catalog::{NotificationCategory, Priority};
pub use center::{CenterUpdate, DeliverySink, Notification, NotificationCenter, ToastSink};
pub use db::{Database, DbError};
pub use settings::{DeliveryMethod, NotificationSettings, SettingsStore};

/// One assembled notification engine: bus, settings store, center, and the
/// dispatch worker wiring them together.
///
/// Constructors must run inside the client's tokio runtime; the dispatch
/// worker is spawned on it. The worker exits on its own when the `Notifier`
/// is dropped and the bus closes.
pub struct Notifier {
    bus: Arc<EventBus>,
    settings: Arc<SettingsStore>,
    center: NotificationCenter,
    toasts: Arc<ToastSink>,
    worker: JoinHandle<()>,
}

impl Notifier {
    /// Open the settings database at `path` and assemble the engine.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::attach(Database::open(path)?, Vec::new())
    }

    /// Like [`Notifier::open`] with the database in the DeskWire data directory.
    pub fn open_default() -> Result<Self, DbError> {
        Self::attach(Database::open(db::default_db_path()?)?, Vec::new())
    }

    /// Fully in-memory engine; settings do not survive the session.
    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::attach(Database::open_in_memory()?, Vec::new())
    }

    /// Assemble the engine around an already-open database, registering any
    /// extra delivery sinks (e.g. the client's mail bridge) alongside the
    /// built-in toast sink.
    pub fn attach(
        db: Database,
        extra_sinks: Vec<Arc<dyn DeliverySink>>,
    ) -> Result<Self, DbError> {
        let db = Arc::new(db);
        let bus = Arc::new(EventBus::new());
        let settings = Arc::new(SettingsStore::new(db));
        let center = NotificationCenter::new();
        let toasts = Arc::new(ToastSink::new());

        let mut sinks: Vec<Arc<dyn DeliverySink>> = vec![toasts.clone()];
        sinks.extend(extra_sinks);

        let worker = center.start(bus.subscribe(), settings.filter_handle(), sinks);

        Ok(Self {
            bus,
            settings,
            center,
            toasts,
            worker,
        })
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn center(&self) -> &NotificationCenter {
        &self.center
    }

    /// Convenience for domain code: emit an event onto the bus.
    pub fn emit(&self, event_type: impl Into<String>, payload: serde_json::Value) -> DomainEvent {
        self.bus.emit(event_type, payload)
    }

    /// Transient-toast feed for the UI shell.
    pub fn subscribe_toasts(&self) -> broadcast::Receiver<Notification> {
        self.toasts.subscribe()
    }

    /// Close the bus and wait for the dispatch worker to drain.
    pub async fn shutdown(self) {
        let Self {
            bus,
            settings,
            center,
            toasts,
            worker,
        } = self;
        drop(bus);
        drop(settings);
        drop(center);
        drop(toasts);
        let _ = worker.await;
    }
}

/// Install the client's log subscriber. Call once at startup.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "deskwire=debug,info".parse().expect("valid env filter"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
