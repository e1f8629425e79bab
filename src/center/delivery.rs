use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::settings::DeliveryMethod;

use super::Notification;

const TOAST_CAPACITY: usize = 64;

/// Boundary for getting an accepted notification in front of the user.
///
/// The crate ships the in-app toast sink; the client registers an email
/// bridge here if it has one. Sink failures are logged by the dispatch
/// worker and never affect the notification list.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Which delivery-method toggle gates this sink.
    fn method(&self) -> DeliveryMethod;

    async fn deliver(&self, notification: &Notification) -> Result<(), String>;
}

/// Forwards accepted notifications to the UI as transient toasts.
pub struct ToastSink {
    tx: broadcast::Sender<Notification>,
}

impl ToastSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(TOAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for ToastSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliverySink for ToastSink {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::InApp
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), String> {
        // A toast nobody is watching is fine; the center pane still has it.
        let _ = self.tx.send(notification.clone());
        Ok(())
    }
}
