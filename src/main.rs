//! SoundVault server — multi-tenant audio upload service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use soundvault_core::config::AppConfig;
use soundvault_core::error::AppError;
use soundvault_database::{DatabasePool, Engine, PostgresBackend};
use soundvault_entity::schema_registry;

#[tokio::main]
async fn main() {
    let env = std::env::var("SOUNDVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SoundVault v{}", env!("CARGO_PKG_VERSION"));

    // Step 1: Database connection and migrations
    tracing::info!("Connecting to database...");
    let pool = DatabasePool::connect(&config.database).await?;
    pool.health_check().await?;
    pool.apply_migrations().await?;

    // Step 2: Data-access engine over the Postgres backend
    let backend = Arc::new(PostgresBackend::new(pool.pool().clone()));
    let engine = Arc::new(Engine::new(backend, schema_registry()));

    // Step 3: Blob storage
    tracing::info!("Initializing '{}' storage provider...", config.storage.provider);
    let storage = soundvault_storage::build_storage(&config.storage).await?;

    // Step 4: Application state and default admin bootstrap
    let host = config.server.host.clone();
    let port = config.server.port;
    let state = soundvault_api::build_state(config, engine, storage)?;
    soundvault_service::bootstrap::ensure_default_admin(&state.user_service).await?;

    // Step 5: Bind and serve
    let app = soundvault_api::build_app(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SoundVault listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    pool.close().await;
    tracing::info!("SoundVault shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
