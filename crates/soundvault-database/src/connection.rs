//! PostgreSQL connection pool for the data-access engine.
//!
//! The pool is created once at startup and handed to the Postgres
//! backend; everything else in the workspace sees only the [`Engine`].
//!
//! [`Engine`]: crate::engine::Engine

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use soundvault_core::AppResult;
use soundvault_core::config::DatabaseConfig;
use soundvault_core::error::{AppError, ErrorKind};

/// The shared PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect to PostgreSQL with the configured pool bounds.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to {}", redact_url(&config.url)),
                    e,
                )
            })?;

        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "connected to PostgreSQL"
        );
        Ok(Self { pool })
    }

    /// The underlying sqlx pool, for the Postgres backend.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply any schema migrations not yet recorded in the database.
    ///
    /// Migrations are embedded from the workspace `migrations/` directory
    /// at compile time.
    pub async fn apply_migrations(&self) -> AppResult<()> {
        let migrator = sqlx::migrate!("../../migrations");
        migrator.run(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
        })?;
        info!(count = migrator.iter().count(), "schema migrations up to date");
        Ok(())
    }

    /// Round-trip a trivial query to prove the connection works.
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Database health check failed", e)
            })?;
        Ok(())
    }

    /// Drain and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

/// Replace the password portion of a connection URL for logging.
fn redact_url(url: &str) -> String {
    let Some(at) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[scheme_end..at].rfind(':') {
        Some(rel) => format!("{}:****{}", &url[..scheme_end + rel], &url[at..]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_hides_password_only() {
        assert_eq!(
            redact_url("postgres://soundvault:hunter2@db:5432/soundvault"),
            "postgres://soundvault:****@db:5432/soundvault"
        );
        // No credentials in the URL.
        assert_eq!(
            redact_url("postgres://localhost:5432/soundvault"),
            "postgres://localhost:5432/soundvault"
        );
        // User without a password.
        assert_eq!(
            redact_url("postgres://soundvault@db:5432/soundvault"),
            "postgres://soundvault@db:5432/soundvault"
        );
    }
}
