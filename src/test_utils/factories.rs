//! Test data factories.
//!
//! Each factory creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// Create a test waitlist entry with a unique email.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let id = Uuid::new_v4();
    let mut entry = WaitlistEntry {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: format!("user-{}@example.com", id.simple()),
        sport: "tennis".to_string(),
        level: "beginner".to_string(),
        created_at: test_datetime(),
    };
    overrides(&mut entry);
    entry
}

/// Fixed instant for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}
