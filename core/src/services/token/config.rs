//! Configuration for the token service

use cd_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Session token expiry in seconds
    pub token_expiry_seconds: i64,
    /// Issuer claim enforced on verification
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(JwtConfig::default())
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret,
            token_expiry_seconds: config.token_expiry,
            issuer: config.issuer,
        }
    }
}
