use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audit_trail_api::config::{LogFormat, ServerConfig, StoreBackend};
use audit_trail_api::router::build_app_router;
use audit_trail_api::state::AppState;
use audit_trail_db::store::{AuditEventStore, MemoryAuditEventStore, PgAuditEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);

    tracing::info!(
        host = %config.host,
        port = config.port,
        store = %config.store_backend,
        "Loaded server configuration",
    );

    // --- Store ---
    let (store, pool): (Arc<dyn AuditEventStore>, Option<audit_trail_db::DbPool>) =
        match &config.store_backend {
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let pool = audit_trail_db::create_pool(database_url, *max_connections)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!(max_connections, "Database connection pool created");

                audit_trail_db::health_check(&pool)
                    .await
                    .context("Database health check failed")?;
                tracing::info!("Database health check passed");

                audit_trail_db::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");

                let store: Arc<dyn AuditEventStore> = Arc::new(PgAuditEventStore::new(pool.clone()));
                (store, Some(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; events will be lost on shutdown");
                let store: Arc<dyn AuditEventStore> = Arc::new(MemoryAuditEventStore::new());
                (store, None)
            }
        };

    // --- Router ---
    let app = build_app_router(AppState::new(store), &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`; [`LogFormat::Json`] switches to JSON lines.
fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "audit_trail_api=debug,audit_trail_db=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that signal is ignored and the other still applies.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
