//! Session token claims for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;

/// Session token expiration time (24 hours)
pub const TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "campus-desk";

/// Claims structure for the session token payload
///
/// The token asserts exactly (account id, role) with a fixed expiry. It is
/// stateless: nothing is persisted server-side, and downstream consumers
/// enforce expiry at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account role ("student" or "admin")
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a session token
    pub fn new_session_token(account_id: Uuid, role: Role) -> Self {
        Self::new_session_token_with_expiry(account_id, role, TOKEN_EXPIRY_HOURS * 3600)
    }

    /// Creates new claims with a custom expiry in seconds
    pub fn new_session_token_with_expiry(account_id: Uuid, role: Role, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the role from the claims, if it parses
    pub fn account_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Expiry as a UTC timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_token_claims() {
        let id = Uuid::new_v4();
        let claims = Claims::new_session_token(id, Role::Student);

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, "student");
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_HOURS * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_round_trip() {
        let id = Uuid::new_v4();
        let claims = Claims::new_session_token(id, Role::Admin);

        assert_eq!(claims.account_id().unwrap(), id);
        assert_eq!(claims.account_role(), Some(Role::Admin));
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims::new_session_token_with_expiry(Uuid::new_v4(), Role::Student, -60);
        assert!(claims.is_expired());
    }

    #[test]
    fn test_jti_uniqueness() {
        let id = Uuid::new_v4();
        let a = Claims::new_session_token(id, Role::Student);
        let b = Claims::new_session_token(id, Role::Student);
        assert_ne!(a.jti, b.jti);
    }
}
