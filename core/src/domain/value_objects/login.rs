//! Login outcome value objects returned by the authentication service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication response containing the session token and its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed session token for API authentication
    pub token: String,

    /// Token expiration time in seconds
    pub expires_in: i64,

    /// Role the token was minted for ("student" or "admin")
    pub role: String,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(token: String, expires_in: i64, role: impl Into<String>) -> Self {
        Self {
            token,
            expires_in,
            role: role.into(),
        }
    }
}

/// Pending OTP challenge metadata
///
/// Returned when a password login succeeded but the second factor is still
/// outstanding. The code itself travels through the delivery collaborator,
/// never through this value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpChallenge {
    /// Identity the challenge was issued for
    pub email: String,

    /// When the pending code expires
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a password login
///
/// Students receive an OTP challenge; admins are authenticated directly.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// A one-time code has been issued and delivery triggered
    OtpPending(OtpChallenge),

    /// Authentication is complete and a session token was minted
    Authenticated(AuthResponse),
}

impl LoginOutcome {
    /// Returns the token response if authentication completed
    pub fn into_authenticated(self) -> Option<AuthResponse> {
        match self {
            LoginOutcome::Authenticated(response) => Some(response),
            LoginOutcome::OtpPending(_) => None,
        }
    }

    /// Whether this outcome is a pending OTP challenge
    pub fn is_otp_pending(&self) -> bool {
        matches!(self, LoginOutcome::OtpPending(_))
    }
}
