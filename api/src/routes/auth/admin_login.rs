use actix_web::{web, Error, HttpResponse};
use validator::Validate;

use cd_core::domain::entities::account::Role;
use cd_core::repositories::AccountRepository;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::utils::validation::mask_email;

use crate::dto::LoginRequest;
use crate::handlers::ApiError;

use super::{respond_to_outcome, validation_message, AppState};

/// Handler for POST /api/v1/auth/admin/login
///
/// Admins authenticate with password only; on success the session token
/// comes back directly with no OTP step. 404 for an unknown email, 401
/// for a wrong password.
pub async fn admin_login<A, O, D>(
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

    log::info!("Processing admin login for {}", mask_email(&request.email));

    let outcome = state
        .auth_service
        .login_password(Role::Admin, &request.email, &request.password)
        .await
        .map_err(ApiError)?;

    Ok(respond_to_outcome(outcome))
}
