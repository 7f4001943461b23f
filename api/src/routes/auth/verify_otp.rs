use actix_web::{web, Error, HttpResponse};
use validator::Validate;

use cd_core::repositories::AccountRepository;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::types::response::ApiResponse;
use cd_shared::utils::validation::mask_email;

use crate::dto::{TokenResponse, VerifyOtpRequest};
use crate::handlers::ApiError;

use super::{validation_message, AppState};

/// Handler for POST /api/v1/auth/student/verify-otp
///
/// Consumes the pending one-time code and mints the session token. A
/// missing, expired, consumed, or mismatched code is a uniform 401; the
/// response never says which.
pub async fn verify_otp<A, O, D>(
    state: web::Data<AppState<A, O, D>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, Error>
where
    A: AccountRepository + 'static,
    O: OtpStore + 'static,
    D: CodeDelivery + 'static,
{
    if let Err(errors) = request.0.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    log::info!(
        "Processing OTP verification for {}",
        mask_email(&request.email)
    );

    let auth = state
        .auth_service
        .verify_otp(&request.email, &request.code)
        .await
        .map_err(ApiError)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse {
        token: auth.token,
        expires_in: auth.expires_in,
        role: auth.role,
    })))
}
