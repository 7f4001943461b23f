//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the CampusDesk
//! backend, providing concrete implementations for the capability traits
//! the core crate defines.
//!
//! ## Architecture
//!
//! - **Database**: MySQL account repository using SQLx
//! - **Cache**: Redis client and the Redis-backed OTP session store
//! - **Delivery**: One-time code delivery implementations

pub mod cache;
pub mod database;
pub mod delivery;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for cd_core::errors::DomainError {
    fn from(err: InfrastructureError) -> Self {
        cd_core::errors::DomainError::Internal {
            message: err.to_string(),
        }
    }
}
