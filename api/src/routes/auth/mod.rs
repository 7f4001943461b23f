//! Authentication route handlers
//!
//! Endpoints covering the full login state machine:
//! - Student signup
//! - Student password login (issues the OTP challenge)
//! - Student OTP verification (mints the session token)
//! - Admin password login (no OTP step)
//! - Session introspection for a bearer token

pub mod admin_login;
pub mod session;
pub mod signup;
pub mod student_login;
pub mod verify_otp;

use actix_web::HttpResponse;
use std::sync::Arc;

use cd_core::domain::value_objects::LoginOutcome;
use cd_core::repositories::AccountRepository;
use cd_core::services::auth::AuthService;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::types::response::ApiResponse;

use crate::dto::{OtpPendingResponse, TokenResponse};

/// Application state that holds shared services
pub struct AppState<A, O, D>
where
    A: AccountRepository,
    O: OtpStore,
    D: CodeDelivery,
{
    pub auth_service: Arc<AuthService<A, O, D>>,
}

/// Render a login outcome as the appropriate response body
///
/// Students land in the OTP-pending branch, admins in the token branch;
/// the handler does not care which role produced the outcome.
pub(crate) fn respond_to_outcome(outcome: LoginOutcome) -> HttpResponse {
    match outcome {
        LoginOutcome::OtpPending(challenge) => {
            HttpResponse::Ok().json(ApiResponse::success(OtpPendingResponse {
                message: "OTP sent".to_string(),
                expires_at: challenge.expires_at,
            }))
        }
        LoginOutcome::Authenticated(auth) => {
            HttpResponse::Ok().json(ApiResponse::success(TokenResponse {
                token: auth.token,
                expires_in: auth.expires_in,
                role: auth.role,
            }))
        }
    }
}

/// Flatten validator errors into a single readable message
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    if fields.is_empty() {
        "Invalid request data".to_string()
    } else {
        format!("Invalid request data: {}", fields.join(", "))
    }
}
