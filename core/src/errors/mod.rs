//! Domain-specific error types and error handling.
//!
//! Expected authentication outcomes (wrong password, unknown identity,
//! invalid code) are modeled as explicit variants rather than faults;
//! storage and signing failures are caught at the service boundary and
//! surfaced as `Internal` without detail leakage.

use cd_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    DuplicateIdentity,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid email or password")]
    BadCredentials,

    #[error("Invalid or expired verification code")]
    InvalidOtp,

    #[error("Could not deliver the verification code")]
    DeliveryFailure,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid length for field: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable machine-readable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => match err {
                AuthError::DuplicateIdentity => "DUPLICATE_IDENTITY",
                AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
                AuthError::BadCredentials => "BAD_CREDENTIALS",
                AuthError::InvalidOtp => "INVALID_OTP",
                AuthError::DeliveryFailure => "DELIVERY_FAILURE",
            },
            DomainError::Token(err) => match err {
                TokenError::TokenExpired => "TOKEN_EXPIRED",
                TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
                TokenError::InvalidSignature => "INVALID_SIGNATURE",
                TokenError::InvalidClaims => "INVALID_CLAIMS",
                TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            },
            DomainError::Validation(err) => match err {
                ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
                ValidationError::InvalidEmail => "INVALID_EMAIL",
                ValidationError::InvalidLength { .. } => "INVALID_LENGTH",
            },
        }
    }

    /// Sanitized message safe to hand to clients
    ///
    /// `Internal` hides its detail behind a generic message; everything
    /// else is an expected outcome and its display form is already clean.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.code(), err.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_codes() {
        let err = DomainError::Auth(AuthError::InvalidOtp);
        assert_eq!(err.code(), "INVALID_OTP");
        assert_eq!(err.public_message(), "Invalid or expired verification code");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = DomainError::Internal {
            message: "sqlx: connection refused on 10.0.0.3".to_string(),
        };
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "INTERNAL_ERROR");
        assert!(!response.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidLength {
            field: "password".to_string(),
            min: 6,
            max: 128,
        };
        assert!(err.to_string().contains("password"));
    }
}
