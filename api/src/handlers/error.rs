//! API error type mapping domain errors to HTTP responses
//!
//! Every failure surfaces as the shared `ErrorResponse` body with a stable
//! error code; statuses follow the external interface contract (404 for
//! unknown identity, 401 for bad password or invalid OTP, 400 for
//! duplicates and malformed input, 500 for anything internal).

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use cd_core::errors::{AuthError, DomainError};
use cd_shared::types::response::ErrorResponse;

/// Wrapper turning `DomainError` into an actix response
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    /// Build a 400 from request-shape validation failures
    pub fn validation(message: impl Into<String>) -> actix_web::Error {
        actix_web::error::InternalError::from_response(
            "validation failed",
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", message.into())),
        )
        .into()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Auth(err) => match err {
                AuthError::DuplicateIdentity => StatusCode::BAD_REQUEST,
                AuthError::AccountNotFound => StatusCode::NOT_FOUND,
                AuthError::BadCredentials | AuthError::InvalidOtp => StatusCode::UNAUTHORIZED,
                AuthError::DeliveryFailure => StatusCode::SERVICE_UNAVAILABLE,
            },
            DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let DomainError::Internal { message } = &self.0 {
            // The detail stays in the log; the client sees a generic body
            log::error!("Internal error: {}", message);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cd_core::errors::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Auth(AuthError::DuplicateIdentity), 400),
            (DomainError::Auth(AuthError::AccountNotFound), 404),
            (DomainError::Auth(AuthError::BadCredentials), 401),
            (DomainError::Auth(AuthError::InvalidOtp), 401),
            (DomainError::Auth(AuthError::DeliveryFailure), 503),
            (DomainError::Validation(ValidationError::InvalidEmail), 400),
            (
                DomainError::Internal {
                    message: "boom".to_string(),
                },
                500,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code().as_u16(), status);
        }
    }
}
