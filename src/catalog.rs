//! Event catalog - centralized event metadata.
//!
//! Single source of truth for:
//! - Known event types
//! - Human-readable notification titles
//! - Derived priority per event
//! - Category membership driving the settings toggles
//!
//! The lookup functions are total: an event type the catalog has never heard
//! of falls back to a generic title and `Medium` priority so that forward
//! compatibility never costs a crash.

use serde::{Deserialize, Serialize};

/// Priority assigned to a notification, derived from its event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// Coarse grouping of event types, one toggle each in the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationCategory {
    Incidents,
    Bugs,
    TestCases,
    BacklogItems,
    Releases,
    Assets,
    Changes,
    Knowledge,
    Tasks,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 9] = [
        NotificationCategory::Incidents,
        NotificationCategory::Bugs,
        NotificationCategory::TestCases,
        NotificationCategory::BacklogItems,
        NotificationCategory::Releases,
        NotificationCategory::Assets,
        NotificationCategory::Changes,
        NotificationCategory::Knowledge,
        NotificationCategory::Tasks,
    ];
}

/// One catalog row. `categories` is a slice: a few events matter to more than
/// one toggle (a rolled-back release is change news too).
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub event_type: &'static str,
    pub title: &'static str,
    pub priority: Priority,
    pub categories: &'static [NotificationCategory],
}

const FALLBACK_TITLE: &str = "New activity";

use NotificationCategory as C;
use Priority as P;

pub const CATALOG: &[CatalogEntry] = &[
    // Incidents
    CatalogEntry {
        event_type: "incident.created",
        title: "New incident reported",
        priority: P::High,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.created.p1",
        title: "Critical P1 incident reported",
        priority: P::Critical,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.created.p2",
        title: "P2 incident reported",
        priority: P::High,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.assigned",
        title: "Incident assigned to you",
        priority: P::Medium,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.updated",
        title: "Incident updated",
        priority: P::Medium,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.escalated",
        title: "Incident escalated",
        priority: P::High,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.resolved",
        title: "Incident resolved",
        priority: P::Medium,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.reopened",
        title: "Incident reopened",
        priority: P::High,
        categories: &[C::Incidents],
    },
    CatalogEntry {
        event_type: "incident.closed",
        title: "Incident closed",
        priority: P::Low,
        categories: &[C::Incidents],
    },
    // Changes
    CatalogEntry {
        event_type: "change.submitted",
        title: "Change request submitted",
        priority: P::Medium,
        categories: &[C::Changes],
    },
    CatalogEntry {
        event_type: "change.approved",
        title: "Change request approved",
        priority: P::Medium,
        categories: &[C::Changes],
    },
    CatalogEntry {
        event_type: "change.rejected",
        title: "Change request rejected",
        priority: P::High,
        categories: &[C::Changes],
    },
    CatalogEntry {
        event_type: "change.scheduled",
        title: "Change scheduled",
        priority: P::Medium,
        categories: &[C::Changes],
    },
    CatalogEntry {
        event_type: "change.implemented",
        title: "Change implemented",
        priority: P::Medium,
        categories: &[C::Changes],
    },
    CatalogEntry {
        event_type: "change.failed",
        title: "Change implementation failed",
        priority: P::High,
        categories: &[C::Changes, C::Incidents],
    },
    // Bugs
    CatalogEntry {
        event_type: "bug.created",
        title: "New bug reported",
        priority: P::High,
        categories: &[C::Bugs],
    },
    CatalogEntry {
        event_type: "bug.assigned",
        title: "Bug assigned to you",
        priority: P::Medium,
        categories: &[C::Bugs],
    },
    CatalogEntry {
        event_type: "bug.fixed",
        title: "Bug fixed",
        priority: P::Medium,
        categories: &[C::Bugs],
    },
    CatalogEntry {
        event_type: "bug.reopened",
        title: "Bug reopened",
        priority: P::High,
        categories: &[C::Bugs],
    },
    CatalogEntry {
        event_type: "bug.closed",
        title: "Bug closed",
        priority: P::Low,
        categories: &[C::Bugs],
    },
    // Test cases
    CatalogEntry {
        event_type: "testCase.created",
        title: "Test case created",
        priority: P::Low,
        categories: &[C::TestCases],
    },
    CatalogEntry {
        event_type: "testCase.passed",
        title: "Test case passed",
        priority: P::Low,
        categories: &[C::TestCases],
    },
    CatalogEntry {
        event_type: "testCase.failed",
        title: "Test case failed",
        priority: P::High,
        categories: &[C::TestCases, C::Bugs],
    },
    CatalogEntry {
        event_type: "testCase.blocked",
        title: "Test case blocked",
        priority: P::Medium,
        categories: &[C::TestCases],
    },
    // Backlog items
    CatalogEntry {
        event_type: "backlogItem.created",
        title: "Backlog item created",
        priority: P::Low,
        categories: &[C::BacklogItems],
    },
    CatalogEntry {
        event_type: "backlogItem.prioritized",
        title: "Backlog item prioritized",
        priority: P::Medium,
        categories: &[C::BacklogItems],
    },
    CatalogEntry {
        event_type: "backlogItem.assigned",
        title: "Backlog item assigned to you",
        priority: P::Medium,
        categories: &[C::BacklogItems],
    },
    CatalogEntry {
        event_type: "backlogItem.completed",
        title: "Backlog item completed",
        priority: P::Low,
        categories: &[C::BacklogItems],
    },
    // Releases
    CatalogEntry {
        event_type: "release.created",
        title: "Release created",
        priority: P::Medium,
        categories: &[C::Releases],
    },
    CatalogEntry {
        event_type: "release.scheduled",
        title: "Release scheduled",
        priority: P::Medium,
        categories: &[C::Releases],
    },
    CatalogEntry {
        event_type: "release.deployed",
        title: "Release deployed",
        priority: P::High,
        categories: &[C::Releases],
    },
    CatalogEntry {
        event_type: "release.rolled_back",
        title: "Release rolled back",
        priority: P::Critical,
        categories: &[C::Releases, C::Changes],
    },
    // Assets
    CatalogEntry {
        event_type: "asset.registered",
        title: "Asset registered",
        priority: P::Low,
        categories: &[C::Assets],
    },
    CatalogEntry {
        event_type: "asset.assigned",
        title: "Asset assigned to you",
        priority: P::Medium,
        categories: &[C::Assets],
    },
    CatalogEntry {
        event_type: "asset.warranty_expiring",
        title: "Asset warranty expiring",
        priority: P::Medium,
        categories: &[C::Assets],
    },
    CatalogEntry {
        event_type: "asset.retired",
        title: "Asset retired",
        priority: P::Low,
        categories: &[C::Assets],
    },
    // Knowledge
    CatalogEntry {
        event_type: "knowledge.published",
        title: "Knowledge article published",
        priority: P::Low,
        categories: &[C::Knowledge],
    },
    CatalogEntry {
        event_type: "knowledge.updated",
        title: "Knowledge article updated",
        priority: P::Low,
        categories: &[C::Knowledge],
    },
    CatalogEntry {
        event_type: "knowledge.review_due",
        title: "Knowledge article review due",
        priority: P::Medium,
        categories: &[C::Knowledge],
    },
    // Tasks
    CatalogEntry {
        event_type: "task.created",
        title: "Task created",
        priority: P::Medium,
        categories: &[C::Tasks],
    },
    CatalogEntry {
        event_type: "task.assigned",
        title: "Task assigned to you",
        priority: P::Medium,
        categories: &[C::Tasks],
    },
    CatalogEntry {
        event_type: "task.due_soon",
        title: "Task due soon",
        priority: P::High,
        categories: &[C::Tasks],
    },
    CatalogEntry {
        event_type: "task.overdue",
        title: "Task overdue",
        priority: P::High,
        categories: &[C::Tasks],
    },
    CatalogEntry {
        event_type: "task.completed",
        title: "Task completed",
        priority: P::Low,
        categories: &[C::Tasks],
    },
];

/// Find the catalog row for an event type.
pub fn lookup(event_type: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.event_type == event_type)
}

/// Human title for an event type; generic label for unknown types.
pub fn title_for(event_type: &str) -> &'static str {
    lookup(event_type).map_or(FALLBACK_TITLE, |entry| entry.title)
}

/// Derived priority for an event type; `Medium` for unknown types.
pub fn priority_for(event_type: &str) -> Priority {
    lookup(event_type).map_or(Priority::Medium, |entry| entry.priority)
}

/// Category membership for an event type; empty for unknown types.
pub fn categories_for(event_type: &str) -> &'static [NotificationCategory] {
    lookup(event_type).map_or(&[], |entry| entry.categories)
}

/// All event types belonging to a category.
pub fn category_event_types(category: NotificationCategory) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|entry| entry.categories.contains(&category))
        .map(|entry| entry.event_type)
        .collect()
}
