//! Session token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting and verifying signed session tokens
///
/// Tokens are HS256-signed with a shared secret supplied out-of-band and
/// carry exactly (account id, role) plus registered claims. Nothing is
/// persisted: a token is valid until its expiry, full stop.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // Only (sub, role) claims are asserted; no audience claim is minted
        validation.validate_aud = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mint a session token for an account
    pub fn mint_token(&self, account_id: Uuid, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new_session_token_with_expiry(
            account_id,
            role,
            self.config.token_expiry_seconds,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_mint_failed", "JWT encoding failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verify a session token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            let kind = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                _ => TokenError::InvalidClaims,
            };
            DomainError::Token(kind)
        })?;

        // The role claim must parse; a token with an unknown role is useless
        if data.claims.account_role().is_none() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn token_expiry_seconds(&self) -> i64 {
        self.config.token_expiry_seconds
    }
}
