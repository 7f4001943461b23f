use actix_web::{web, Error, HttpResponse};
use validator::Validate;

use cd_core::domain::entities::account::Role;
use cd_core::repositories::AccountRepository;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::utils::validation::mask_email;

use crate::dto::LoginRequest;
use crate::handlers::ApiError;

use super::{respond_to_outcome, validation_message, AppState};

/// Handler for POST /api/v1/auth/student/login
///
/// Validates the password and issues a one-time code. The code travels
/// through the delivery channel, not this response; the client only learns
/// that a challenge is pending and when it expires. 404 for an unknown
/// email, 401 for a wrong password.
pub async fn student_login<A, O, D>(
    state: web::Data<AppState<A, O, D>>,
    request: web::Json<LoginRequest>,
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
        "Processing student login for {}",
        mask_email(&request.email)
    );

    let outcome = state
        .auth_service
        .login_password(Role::Student, &request.email, &request.password)
        .await
        .map_err(ApiError)?;

    Ok(respond_to_outcome(outcome))
}
