use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entries created strictly after `now - RECENT_WINDOW_DAYS` count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// One signup record. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub sport: String,
    pub level: String,
    #[serde(rename = "timestamp", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(
        name: String,
        email: String,
        sport: String,
        level: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            sport,
            level,
            created_at,
        }
    }
}

/// The full entry collection, in insertion order.
///
/// Serializes as a bare JSON array so the on-disk file stays a plain list of
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waitlist {
    entries: Vec<WaitlistEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WaitlistStats {
    pub total: usize,
    pub sports: BTreeMap<String, usize>,
    pub levels: BTreeMap<String, usize>,
    pub recent: usize,
}

impl Waitlist {
    pub fn new(entries: Vec<WaitlistEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WaitlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose email matches exactly (case-sensitive).
    pub fn find_by_email(&self, email: &str) -> Option<&WaitlistEntry> {
        self.entries.iter().find(|entry| entry.email == email)
    }

    pub fn append(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn stats(&self, now: DateTime<Utc>) -> WaitlistStats {
        let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

        let mut stats = WaitlistStats {
            total: self.entries.len(),
            ..WaitlistStats::default()
        };

        for entry in &self.entries {
            *stats.sports.entry(entry.sport.clone()).or_default() += 1;
            *stats.levels.entry(entry.level.clone()).or_default() += 1;
            if entry.created_at > cutoff {
                stats.recent += 1;
            }
        }

        stats
    }
}

impl From<Vec<WaitlistEntry>> for Waitlist {
    fn from(entries: Vec<WaitlistEntry>) -> Self {
        Self::new(entries)
    }
}
