//! Server Configuration
//!
//! Configuration is loaded from environment variables, with sensible
//! defaults for local development where possible. The database is the
//! engine's source of truth, so unlike optional services it is required:
//! startup fails without `DATABASE_URL`.

use sqlx::PgPool;
use thiserror::Error;

/// Errors loading server configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("SERVER_PORT is not a valid port: {value}")]
    InvalidPort { value: String },
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (`SERVER_PORT`, default 3000)
    pub port: u16,
    /// PostgreSQL connection string (`DATABASE_URL`, required)
    pub database_url: String,
    /// Push gateway endpoint (`PUSH_GATEWAY_URL`; absent disables push)
    pub push_gateway_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let port = match std::env::var("SERVER_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            Err(_) => 3000,
        };

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL").ok().filter(|v| !v.is_empty());

        Ok(Self {
            port,
            database_url,
            push_gateway_url,
        })
    }
}

/// Connect to the database and run migrations
pub async fn connect_database(config: &ServerConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::MissingDatabaseUrl
            .to_string()
            .contains("DATABASE_URL"));
        let error = ConfigError::InvalidPort {
            value: "eighty".to_string(),
        };
        assert!(error.to_string().contains("eighty"));
    }
}
