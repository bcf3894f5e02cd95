//! API server entry point.

use std::sync::Arc;

use api::{AppState, Config};
use data_store::JsonFileStore;
use domain::Identity;
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    api::telemetry::init_tracing(&config.log_level);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = api::telemetry::install_metrics()
        .expect("failed to install Prometheus recorder");

    // 3. Load the data files
    let store = JsonFileStore::new(&config.data_dir);
    let identity = Identity::from_config(config.current_user_id.as_deref());
    let state = AppState::load(store, identity)
        .await
        .expect("failed to load data files");

    // 4. Build the application
    let app = api::create_app(Arc::new(state), metrics_handle);

    // 5. Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    tracing::info!(%addr, data_dir = %config.data_dir.display(), "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
