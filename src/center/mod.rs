//! Notification center - the filtered, in-memory notification list.
//!
//! A `NotificationCenter` is an explicitly constructed service: the client
//! builds one per session and hands its dispatch worker a bus subscription.
//! The worker consumes events sequentially, consults the current dispatch
//! filter, and materializes the survivors into `Notification` records the
//! center pane reads. UI refresh is push-based via `subscribe_updates`.

mod delivery;
mod subscriber;

pub use delivery::{DeliverySink, ToastSink};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::catalog::{NotificationCategory, Priority};

/// Notifications retained in memory; the oldest are evicted past this.
const MAX_RETAINED: usize = 200;
const UPDATE_CAPACITY: usize = 256;

/// A user-visible record derived from an accepted event.
///
/// `category` is the event's primary category (icon selection in the UI);
/// events outside the catalog have none.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub event_type: String,
    pub category: Option<NotificationCategory>,
    pub title: String,
    pub priority: Priority,
    pub read: bool,
    pub created_at: String,
}

/// Change feed entry pushed to UI observers.
#[derive(Debug, Clone, Serialize)]
pub enum CenterUpdate {
    Posted(Notification),
    MarkedRead { id: String },
    MarkedAllRead,
    Cleared,
}

struct CenterInner {
    /// Newest first; mutated only by the dispatch worker and user actions.
    notifications: Mutex<VecDeque<Notification>>,
    updates: broadcast::Sender<CenterUpdate>,
}

#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            inner: Arc::new(CenterInner {
                notifications: Mutex::new(VecDeque::new()),
                updates,
            }),
        }
    }

    /// Current list, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// Unread subset, newest first.
    pub fn unread(&self) -> Vec<Notification> {
        self.lock().iter().filter(|n| !n.read).cloned().collect()
    }

    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|n| !n.read).count()
    }

    /// One page of the list; the center pane pages client-side.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<Notification> {
        self.lock().iter().skip(offset).take(limit).cloned().collect()
    }

    /// Flip one record to read. Read flags never go back; repeat calls are
    /// no-ops. Returns false when the id is unknown (already cleared).
    pub fn mark_as_read(&self, id: &str) -> bool {
        let mut list = self.lock();
        let Some(notification) = list.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        notification.read = true;
        drop(list);

        let _ = self.inner.updates.send(CenterUpdate::MarkedRead { id: id.to_string() });
        true
    }

    pub fn mark_all_as_read(&self) {
        let mut list = self.lock();
        for notification in list.iter_mut() {
            notification.read = true;
        }
        drop(list);

        let _ = self.inner.updates.send(CenterUpdate::MarkedAllRead);
    }

    pub fn clear_all(&self) {
        self.lock().clear();
        let _ = self.inner.updates.send(CenterUpdate::Cleared);
    }

    /// Change feed for the UI; replaces interval polling.
    pub fn subscribe_updates(&self) -> broadcast::Receiver<CenterUpdate> {
        self.inner.updates.subscribe()
    }

    /// Prepend an accepted notification, evicting past the retention cap.
    fn post(&self, notification: Notification) {
        let mut list = self.lock();
        list.push_front(notification.clone());
        list.truncate(MAX_RETAINED);
        drop(list);

        let _ = self.inner.updates.send(CenterUpdate::Posted(notification));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.inner
            .notifications
            .lock()
            .expect("notification list mutex poisoned")
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
