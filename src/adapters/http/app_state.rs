use std::sync::Arc;
use std::time::Instant;

use crate::{infra::config::AppConfig, use_cases::waitlist::WaitlistUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    /// Process start, reported as uptime by the health endpoint.
    pub started_at: Instant,
}
