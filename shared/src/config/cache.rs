//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration (shared OTP store backing)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables (`REDIS_URL`)
    pub fn from_env() -> Self {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let connection_timeout = std::env::var("REDIS_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Self {
            url,
            connection_timeout,
            key_prefix: None,
        }
    }
}
