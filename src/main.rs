use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use pickmeup_waitlist::infra::{app::create_app, setup::init_app_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let app_state = init_app_state().await?;

    // Read what we log from config before moving app_state
    let bind_addr = app_state.config.bind_addr;
    let waitlist_file = app_state.config.waitlist_file.clone();

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!("Landing page server listening at {}", local_addr);
    info!("Waitlist submissions will be saved to {}", waitlist_file.display());
    info!("Open http://localhost:{} to view the landing page", local_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut term = signal(SignalKind::terminate()).expect("failed to install signal handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
