use crate::{
    adapters::{http::app_state::AppState, persistence::JsonFileWaitlistStore},
    infra::config::AppConfig,
    use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
};
use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    init_tracing(config.log_file.as_deref());

    let store = Arc::new(JsonFileWaitlistStore::new(&config.waitlist_file));
    store.init().await.with_context(|| {
        format!(
            "failed to initialize waitlist file at {}",
            config.waitlist_file.display()
        )
    })?;

    let waitlist_use_cases = WaitlistUseCases::new(store as Arc<dyn WaitlistRepo>);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        started_at: Instant::now(),
    })
}

pub fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pickmeup_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), only when LOG_FILE is set
    let mut file_error = None;
    let json_layer = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true),
        ),
        Err(err) => {
            file_error = Some((path.to_path_buf(), err));
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some((path, err)) = file_error {
        tracing::warn!(path = %path.display(), error = %err, "Cannot open log file, logging to console only");
    }
}
