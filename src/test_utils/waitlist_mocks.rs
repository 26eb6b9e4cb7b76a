//! In-memory mock implementations of `WaitlistRepo`.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::{Waitlist, WaitlistEntry},
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

/// In-memory implementation of WaitlistRepo for testing.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub waitlist: Mutex<Waitlist>,
    saves: AtomicUsize,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            waitlist: Mutex::new(Waitlist::new(entries)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> Waitlist {
        self.waitlist.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn load(&self) -> AppResult<Waitlist> {
        let waitlist = self.snapshot();
        // Let concurrent callers interleave between load and save.
        tokio::task::yield_now().await;
        Ok(waitlist)
    }

    async fn save(&self, waitlist: &Waitlist) -> AppResult<()> {
        *self.waitlist.lock().unwrap() = waitlist.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// FailingWaitlistRepo
// ============================================================================

/// WaitlistRepo whose loads or saves always fail with a storage error.
#[derive(Default)]
pub struct FailingWaitlistRepo {
    fail_loads: bool,
    fail_saves: bool,
}

impl FailingWaitlistRepo {
    pub fn failing_loads() -> Self {
        Self {
            fail_loads: true,
            fail_saves: false,
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_loads: false,
            fail_saves: true,
        }
    }
}

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn load(&self) -> AppResult<Waitlist> {
        if self.fail_loads {
            return Err(AppError::Storage("simulated read failure".into()));
        }
        Ok(Waitlist::default())
    }

    async fn save(&self, _waitlist: &Waitlist) -> AppResult<()> {
        if self.fail_saves {
            return Err(AppError::Storage("simulated write failure".into()));
        }
        Ok(())
    }
}
