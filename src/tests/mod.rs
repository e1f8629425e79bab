//! Integration-style tests for the assembled notification engine.
//!
//! Shared helpers live here; the scenario files cover dispatch filtering,
//! notification list operations, and settings persistence.


#[cfg(test)]
mod persistence;

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::center::CenterUpdate;
use crate::db::Database;
use crate::Notifier;

/// Fresh in-memory engine.
pub(crate) fn notifier() -> Notifier {
    Notifier::attach(
        Database::open_in_memory().expect("in-memory DB"),
        Vec::new(),
    )
    .expect("notifier assembly")
}

/// Wait for the next change-feed entry. Dispatch runs on a spawned worker,
/// so tests synchronize on the feed instead of sleeping.
pub(crate) async fn next_update(rx: &mut broadcast::Receiver<CenterUpdate>) -> CenterUpdate {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for center update")
        .expect("update channel closed")
}

/// Wait until the feed reports a posted notification for `event_type`.
/// Used as an ordering marker after emitting events that must be dropped.
pub(crate) async fn next_posted(
    rx: &mut broadcast::Receiver<CenterUpdate>,
    event_type: &str,
) -> crate::center::Notification {
    loop {
        if let CenterUpdate::Posted(notification) = next_update(rx).await {
            assert_eq!(
                notification.event_type, event_type,
                "unexpected notification posted before {event_type}"
            );
            return notification;
        }
    }
}
