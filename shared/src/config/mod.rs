//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and OTP lifecycle configuration
//! - `cache` - Redis configuration for the shared OTP store
//! - `database` - Database connection and pool configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod server;

// Re-export commonly used types
pub use auth::{JwtConfig, OtpConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
