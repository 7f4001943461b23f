//! Authentication configuration: token signing and OTP lifecycle

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing session tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            token_expiry: 86_400, // 24 hours
            issuer: String::from("campus-desk"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Reads `JWT_SECRET` and `JWT_TOKEN_EXPIRY` (seconds). The secret must
    /// come from the environment in production; the fallback exists only so
    /// development setups boot without one.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-change-in-production".to_string());
        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86_400);

        Self {
            secret,
            token_expiry,
            issuer: String::from("campus-desk"),
        }
    }

    /// Set token expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry = hours * 3600;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}

/// One-time password configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in minutes
    pub ttl_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { ttl_minutes: 5 }
    }
}

impl OtpConfig {
    /// Create from environment variables (`OTP_TTL_MINUTES`)
    pub fn from_env() -> Self {
        let ttl_minutes = std::env::var("OTP_TTL_MINUTES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Self { ttl_minutes }
    }
}
