//! Settings persistence through full engine restarts.

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::catalog::NotificationCategory;
use crate::settings::NotificationSettings;
use crate::Notifier;

use super::next_posted;

#[tokio::test]
async fn settings_survive_engine_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deskwire.db");

    {
        let notifier = Notifier::open(&path).expect("first open");
        assert_eq!(notifier.settings().current(), NotificationSettings::default());
        notifier
            .settings()
            .toggle_category(NotificationCategory::Changes);
        notifier.shutdown().await;
    }

    let notifier = Notifier::open(&path).expect("second open");
    let settings = notifier.settings().current();
    assert!(!settings.categories.changes);
    assert!(settings.categories.incidents);

    // The restored toggle filters dispatch immediately.
    let mut updates = notifier.center().subscribe_updates();
    notifier.emit("change.approved", json!({}));
    notifier.emit("incident.created", json!({}));
    next_posted(&mut updates, "incident.created").await;
    assert_eq!(notifier.center().notifications().len(), 1);
}

#[tokio::test]
async fn notifications_do_not_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deskwire.db");

    {
        let notifier = Notifier::open(&path).expect("first open");
        let mut updates = notifier.center().subscribe_updates();
        notifier.emit("incident.created", json!({}));
        next_posted(&mut updates, "incident.created").await;
        notifier.shutdown().await;
    }

    let notifier = Notifier::open(&path).expect("second open");
    assert!(notifier.center().notifications().is_empty());
}
