//! Storage layer unit tests.

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn setting_roundtrip() {
        let db = Database::open_in_memory().expect("in-memory DB");

        assert!(db.get_setting("notification_settings").unwrap().is_none());

        db.upsert_setting("notification_settings", r#"{"a":1}"#, "2026-01-01T00:00:00Z")
            .unwrap();
        assert_eq!(
            db.get_setting("notification_settings").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn upsert_overwrites_existing_value() {
        let db = Database::open_in_memory().expect("in-memory DB");

        db.upsert_setting("k", "1", "2026-01-01T00:00:00Z").unwrap();
        db.upsert_setting("k", "2", "2026-01-02T00:00:00Z").unwrap();

        assert_eq!(db.get_setting("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn migrations_are_idempotent_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskwire.db");

        {
            let db = Database::open(&path).expect("first open");
            db.upsert_setting("k", "1", "2026-01-01T00:00:00Z").unwrap();
        }

        let db = Database::open(&path).expect("second open");
        assert_eq!(db.get_setting("k").unwrap().as_deref(), Some("1"));
    }
}
