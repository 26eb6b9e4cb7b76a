//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by an in-memory
//! waitlist repository unless another repo is supplied.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::config::AppConfig,
    test_utils::InMemoryWaitlistRepo,
};

/// Builder for creating `AppState` with test dependencies.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.email = "taken@example.com".to_string()))
///     .build_with_repo();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    repo: Option<Arc<dyn WaitlistRepo>>,
    static_dir: PathBuf,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            repo: None,
            static_dir: std::env::temp_dir().join(format!("no_site_{}", Uuid::new_v4())),
        }
    }

    /// Seed the in-memory repo with an existing entry.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Use a custom repo instead of the in-memory one. Seeded entries are ignored.
    pub fn with_repo(mut self, repo: impl WaitlistRepo + 'static) -> Self {
        self.repo = Some(Arc::new(repo));
        self
    }

    pub fn with_static_dir(mut self, dir: &Path) -> Self {
        self.static_dir = dir.to_path_buf();
        self
    }

    pub fn build(mut self) -> AppState {
        let repo: Arc<dyn WaitlistRepo> = match self.repo.take() {
            Some(repo) => repo,
            None => Arc::new(InMemoryWaitlistRepo::with_entries(std::mem::take(
                &mut self.entries,
            ))),
        };
        self.assemble(repo)
    }

    /// Build with the in-memory repo and return it for assertions.
    pub fn build_with_repo(mut self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(std::mem::take(
            &mut self.entries,
        )));
        let app_state = self.assemble(repo.clone() as Arc<dyn WaitlistRepo>);
        (app_state, repo)
    }

    fn assemble(self, repo: Arc<dyn WaitlistRepo>) -> AppState {
        let config = AppConfig {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            waitlist_file: PathBuf::from("unused-in-tests.json"),
            static_dir: self.static_dir,
            cors_origin: None,
            log_file: None,
        };

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(repo)),
            started_at: Instant::now(),
        }
    }
}
