use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::{is_valid_email, non_blank};
use crate::domain::entities::waitlist_entry::{Waitlist, WaitlistEntry, WaitlistStats};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Reads the whole collection. Missing storage is an empty collection;
    /// unreadable or malformed storage is `AppError::Storage`.
    async fn load(&self) -> AppResult<Waitlist>;

    /// Replaces the persisted collection with `waitlist`.
    async fn save(&self, waitlist: &Waitlist) -> AppResult<()>;
}

// ============================================================================
// Input Types
// ============================================================================

/// A submission that passed validation. Only constructible via
/// [`NewWaitlistEntry::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    name: String,
    email: String,
    sport: String,
    level: String,
}

impl NewWaitlistEntry {
    pub fn validate(
        name: Option<&str>,
        email: Option<&str>,
        sport: Option<&str>,
        level: Option<&str>,
    ) -> AppResult<Self> {
        let (Some(name), Some(_), Some(sport), Some(level)) = (
            non_blank(name),
            non_blank(email),
            non_blank(sport),
            non_blank(level),
        ) else {
            return Err(AppError::Validation("All fields are required".into()));
        };

        // The email is checked and stored exactly as provided, untrimmed.
        let email = email.unwrap_or_default();
        if !is_valid_email(email) {
            return Err(AppError::Validation(
                "Please enter a valid email address".into(),
            ));
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            sport: sport.to_owned(),
            level: level.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn into_entry(self, created_at: DateTime<Utc>) -> WaitlistEntry {
        WaitlistEntry::new(self.name, self.email, self.sport, self.level, created_at)
    }
}

// ============================================================================
// Use Cases
// ============================================================================

pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    // Serializes the load / check / append / save cycle within this process.
    // Separate processes sharing one file are not coordinated.
    write_lock: Mutex<()>,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Adds a validated submission to the waitlist and persists it.
    #[instrument(skip(self, input), fields(email = %input.email()))]
    pub async fn join(&self, input: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let _guard = self.write_lock.lock().await;

        let waitlist = self.load_or_empty().await;

        if waitlist.find_by_email(input.email()).is_some() {
            return Err(AppError::Duplicate);
        }

        let entry = input.into_entry(Utc::now());
        let waitlist = waitlist.append(entry.clone());

        self.repo.save(&waitlist).await?;

        tracing::info!(
            id = %entry.id,
            name = %entry.name,
            email = %entry.email,
            sport = %entry.sport,
            level = %entry.level,
            "New waitlist entry"
        );

        Ok(entry)
    }

    /// Aggregate counts over the currently persisted collection.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> WaitlistStats {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> WaitlistStats {
        self.load_or_empty().await.stats(now)
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    /// Unreadable storage is treated as an empty waitlist. A later successful
    /// save replaces whatever was on disk.
    async fn load_or_empty(&self) -> Waitlist {
        match self.repo.load().await {
            Ok(waitlist) => waitlist,
            Err(err) => {
                tracing::error!(error = %err, "Failed to read waitlist, using empty collection");
                Waitlist::default()
            }
        }
    }
}
