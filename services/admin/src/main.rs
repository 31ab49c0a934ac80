use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};

use lyceum_admin::config::AdminConfig;
use lyceum_admin::router::build_router;
use lyceum_admin::state::AppState;
use lyceum_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AdminConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url());
    options
        .max_connections(config.db_max_open)
        .min_connections(config.db_max_idle)
        .max_lifetime(Duration::from_secs(3600));

    let db = tokio::time::timeout(Duration::from_secs(10), Database::connect(options))
        .await
        .expect("database connect timed out")
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        jwt_issuer: config.jwt_issuer.clone(),
        school_defaults: config.school_defaults.clone(),
    };

    let router = build_router(state, &config);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(env = %config.app_env, "admin service listening on {addr}");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("server error");
    });

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    info!("shutdown signal received, draining connections");
    let _ = shutdown_tx.send(());

    if tokio::time::timeout(Duration::from_secs(5), server).await.is_err() {
        warn!("drain deadline exceeded, exiting");
    }
}
