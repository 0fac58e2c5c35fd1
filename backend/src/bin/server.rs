use std::sync::Arc;

use tracing::info;

use gridguess::env_config;
use gridguess::server::{create_router, AppState};
use gridguess::storage::SqliteRoundStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::init_tracing();
    let port = env_config::server_port();
    let db_path = env_config::database_path();
    let restart_delay = env_config::restart_delay();

    let store = SqliteRoundStore::open(&db_path, env_config::retention_policy())?;
    info!(path = %db_path.display(), retention = ?store.retention(), "round store ready");

    let app = create_router(AppState::new(Arc::new(store), restart_delay));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!(port, "server is running, press Ctrl+C to stop");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stopping server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
}
