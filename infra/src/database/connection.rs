//! Database connection pool management

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

use cd_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Create a MySQL connection pool from configuration
///
/// Connections are tested before being handed out so a dead connection
/// never reaches a request handler.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    tracing::info!(
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    tracing::info!("Database connection pool ready");
    Ok(pool)
}
