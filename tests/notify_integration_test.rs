//! End-to-end test through the public crate surface: assemble an engine
//! against a real database file, drive the spec'd notification flow, restart,
//! and check what persisted.

use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use deskwire_notify::{
    CenterUpdate, DeliveryMethod, NotificationCategory, Notifier, Priority,
};

async fn wait_posted(
    rx: &mut tokio::sync::broadcast::Receiver<CenterUpdate>,
    event_type: &str,
) {
    loop {
        let update = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for center update")
            .expect("update channel closed");
        if let CenterUpdate::Posted(notification) = update {
            assert_eq!(notification.event_type, event_type);
            return;
        }
    }
}

#[tokio::test]
async fn full_session_flow() {
    deskwire_notify::init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deskwire.db");

    let notifier = Notifier::open(&path).expect("open engine");
    let mut updates = notifier.center().subscribe_updates();
    let mut toasts = notifier.subscribe_toasts();

    // Default settings accept everything.
    notifier.emit("change.rejected", json!({"change_id": "CHG-7"}));
    wait_posted(&mut updates, "change.rejected").await;

    let list = notifier.center().notifications();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Change request rejected");
    assert_eq!(list[0].priority, Priority::High);
    assert!(!list[0].read);
    assert_eq!(
        toasts.recv().await.unwrap().event_type,
        "change.rejected"
    );

    // Turning a category off suppresses its events from then on.
    notifier
        .settings()
        .toggle_category(NotificationCategory::Changes);
    notifier.emit("change.approved", json!({}));
    notifier.emit("incident.created", json!({}));
    wait_posted(&mut updates, "incident.created").await;
    assert_eq!(notifier.center().notifications().len(), 2);
    assert_eq!(
        toasts.recv().await.unwrap().event_type,
        "incident.created"
    );

    // Muting in-app delivery silences toasts but keeps the list growing.
    notifier
        .settings()
        .toggle_delivery_method(DeliveryMethod::InApp);
    notifier.emit("bug.created", json!({}));
    wait_posted(&mut updates, "bug.created").await;
    assert_eq!(notifier.center().notifications().len(), 3);
    assert!(matches!(
        toasts.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));

    notifier.center().mark_all_as_read();
    assert_eq!(notifier.center().unread_count(), 0);

    notifier.shutdown().await;

    // Settings survive the restart; the notification list does not.
    let notifier = Notifier::open(&path).expect("reopen engine");
    let settings = notifier.settings().current();
    assert!(!settings.categories.changes);
    assert!(!settings.delivery_methods.in_app);
    assert!(notifier.center().notifications().is_empty());
}
