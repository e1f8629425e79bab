//! Per-user notification preferences and the dispatch filter derived from them.
//!
//! Settings are stored as one JSON value under a well-known key in the local
//! settings table, exactly the shape the settings screen edits:
//! categories, delivery methods, and priority levels, all defaulting to on.


use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, NotificationCategory, Priority};
use crate::db::Database;

/// Settings row key in the local database.
pub const SETTINGS_KEY: &str = "notification_settings";

/// How a notification reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryMethod {
    InApp,
    Email,
}

/// One toggle per notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryToggles {
    pub incidents: bool,
    pub bugs: bool,
    pub test_cases: bool,
    pub backlog_items: bool,
    pub releases: bool,
    pub assets: bool,
    pub changes: bool,
    pub knowledge: bool,
    pub tasks: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self {
            incidents: true,
            bugs: true,
            test_cases: true,
            backlog_items: true,
            releases: true,
            assets: true,
            changes: true,
            knowledge: true,
            tasks: true,
        }
    }
}

impl CategoryToggles {
    pub fn enabled(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::Incidents => self.incidents,
            NotificationCategory::Bugs => self.bugs,
            NotificationCategory::TestCases => self.test_cases,
            NotificationCategory::BacklogItems => self.backlog_items,
            NotificationCategory::Releases => self.releases,
            NotificationCategory::Assets => self.assets,
            NotificationCategory::Changes => self.changes,
            NotificationCategory::Knowledge => self.knowledge,
            NotificationCategory::Tasks => self.tasks,
        }
    }

    fn toggle(&mut self, category: NotificationCategory) {
        match category {
            NotificationCategory::Incidents => self.incidents = !self.incidents,
            NotificationCategory::Bugs => self.bugs = !self.bugs,
            NotificationCategory::TestCases => self.test_cases = !self.test_cases,
            NotificationCategory::BacklogItems => self.backlog_items = !self.backlog_items,
            NotificationCategory::Releases => self.releases = !self.releases,
            NotificationCategory::Assets => self.assets = !self.assets,
            NotificationCategory::Changes => self.changes = !self.changes,
            NotificationCategory::Knowledge => self.knowledge = !self.knowledge,
            NotificationCategory::Tasks => self.tasks = !self.tasks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethods {
    pub in_app: bool,
    pub email: bool,
}

impl Default for DeliveryMethods {
    fn default() -> Self {
        Self {
            in_app: true,
            email: true,
        }
    }
}

impl DeliveryMethods {
    pub fn enabled(&self, method: DeliveryMethod) -> bool {
        match method {
            DeliveryMethod::InApp => self.in_app,
            DeliveryMethod::Email => self.email,
        }
    }

    fn toggle(&mut self, method: DeliveryMethod) {
        match method {
            DeliveryMethod::InApp => self.in_app = !self.in_app,
            DeliveryMethod::Email => self.email = !self.email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityLevels {
    pub critical: bool,
    pub high: bool,
    pub medium: bool,
    pub low: bool,
}

impl Default for PriorityLevels {
    fn default() -> Self {
        Self {
            critical: true,
            high: true,
            medium: true,
            low: true,
        }
    }
}

impl PriorityLevels {
    pub fn enabled(&self, priority: Priority) -> bool {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn toggle(&mut self, priority: Priority) {
        match priority {
            Priority::Critical => self.critical = !self.critical,
            Priority::High => self.high = !self.high,
            Priority::Medium => self.medium = !self.medium,
            Priority::Low => self.low = !self.low,
        }
    }
}

/// The persisted preferences value. Everything defaults to on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub categories: CategoryToggles,
    pub delivery_methods: DeliveryMethods,
    pub priority_levels: PriorityLevels,
}

/// What the dispatch worker consults for every incoming event. Recomputed on
/// each settings change and handed over before the toggle call returns.
#[derive(Debug, Clone, Default)]
pub struct DispatchFilter {
    disabled_events: HashSet<String>,
    priority_levels: PriorityLevels,
    delivery_methods: DeliveryMethods,
}

impl DispatchFilter {
    pub fn from_settings(settings: &NotificationSettings) -> Self {
        Self {
            disabled_events: derive_disabled_events(&settings.categories),
            priority_levels: settings.priority_levels,
            delivery_methods: settings.delivery_methods,
        }
    }

    /// True when the event must be dropped: its type sits in the disabled set,
    /// or its derived priority level is toggled off.
    pub fn blocks(&self, event_type: &str, priority: Priority) -> bool {
        if self.disabled_events.contains(event_type) {
            return true;
        }
        !self.priority_levels.enabled(priority)
    }

    pub fn delivery_enabled(&self, method: DeliveryMethod) -> bool {
        self.delivery_methods.enabled(method)
    }

    #[cfg(test)]
    pub(crate) fn disabled_events(&self) -> &HashSet<String> {
        &self.disabled_events
    }
}

/// An event type is disabled only when every category it belongs to is off.
/// Catalog entries always carry at least one category; event types outside
/// the catalog belong to none and can never be disabled by a category toggle.
fn derive_disabled_events(categories: &CategoryToggles) -> HashSet<String> {
    catalog::CATALOG
        .iter()
        .filter(|entry| {
            !entry.categories.is_empty()
                && entry.categories.iter().all(|c| !categories.enabled(*c))
        })
        .map(|entry| entry.event_type.to_string())
        .collect()
}

/// Load settings from the database (or return defaults).
///
/// A missing row, unreadable storage, or unparseable JSON all degrade to
/// defaults; the notification engine keeps running either way.
pub fn load_settings(db: &Database) -> NotificationSettings {
    match db.get_setting(SETTINGS_KEY) {
        Ok(Some(json_str)) => serde_json::from_str(&json_str).unwrap_or_else(|e| {
            tracing::warn!("stored notification settings unparseable, using defaults: {e}");
            NotificationSettings::default()
        }),
        Ok(None) => NotificationSettings::default(),
        Err(e) => {
            tracing::warn!("failed to load notification settings, using defaults: {e}");
            NotificationSettings::default()
        }
    }
}

/// Save settings to the database.
pub fn save_settings(db: &Database, settings: &NotificationSettings) -> Result<(), String> {
    let json_str = serde_json::to_string(settings)
        .map_err(|e| format!("failed to serialize notification settings: {e}"))?;

    let now = chrono::Utc::now().to_rfc3339();
    db.upsert_setting(SETTINGS_KEY, &json_str, &now)
        .map_err(|e| format!("failed to save notification settings: {e}"))?;

    Ok(())
}

/// Owns the current settings value. Every toggle persists the new value and
/// pushes the recomputed dispatch filter to the subscriber synchronously,
/// so filtering reflects the change before the call returns.
pub struct SettingsStore {
    db: Arc<Database>,
    current: Mutex<NotificationSettings>,
    filter: Arc<RwLock<DispatchFilter>>,
}

impl SettingsStore {
    pub fn new(db: Arc<Database>) -> Self {
        let settings = load_settings(&db);
        let filter = Arc::new(RwLock::new(DispatchFilter::from_settings(&settings)));
        Self {
            db,
            current: Mutex::new(settings),
            filter,
        }
    }

    /// The filter handle the dispatch worker reads per event.
    pub fn filter_handle(&self) -> Arc<RwLock<DispatchFilter>> {
        self.filter.clone()
    }

    /// Snapshot of the current settings.
    pub fn current(&self) -> NotificationSettings {
        self.current.lock().expect("settings mutex poisoned").clone()
    }

    pub fn toggle_category(&self, category: NotificationCategory) -> NotificationSettings {
        self.apply(|settings| settings.categories.toggle(category))
    }

    pub fn toggle_delivery_method(&self, method: DeliveryMethod) -> NotificationSettings {
        self.apply(|settings| settings.delivery_methods.toggle(method))
    }

    pub fn toggle_priority_level(&self, priority: Priority) -> NotificationSettings {
        self.apply(|settings| settings.priority_levels.toggle(priority))
    }

    /// Restore defaults (the logout/reset path).
    pub fn reset(&self) -> NotificationSettings {
        self.apply(|settings| *settings = NotificationSettings::default())
    }

    fn apply(
        &self,
        mutate: impl FnOnce(&mut NotificationSettings),
    ) -> NotificationSettings {
        let mut current = self.current.lock().expect("settings mutex poisoned");
        mutate(&mut current);
        let updated = current.clone();
        drop(current);

        // Write failures keep the in-memory value authoritative for this session.
        if let Err(e) = save_settings(&self.db, &updated) {
            tracing::warn!("{e}");
        }

        let mut filter = self.filter.write().expect("filter lock poisoned");
        *filter = DispatchFilter::from_settings(&updated);
        drop(filter);

        updated
    }
}
