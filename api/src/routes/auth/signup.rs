use actix_web::{web, Error, HttpResponse};
use validator::Validate;

use cd_core::domain::entities::account::Role;
use cd_core::repositories::AccountRepository;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::types::response::ApiResponse;
use cd_shared::utils::validation::mask_email;

use crate::dto::{SignupRequest, SignupResponse};
use crate::handlers::ApiError;

use super::{validation_message, AppState};

/// Handler for POST /api/v1/auth/student/signup
///
/// Creates a student account. Responds 201 on success, 400 when the email
/// is already registered as a student or the payload is malformed.
pub async fn student_signup<A, O, D>(
    state: web::Data<AppState<A, O, D>>,
    request: web::Json<SignupRequest>,
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
        "Processing student signup for {}",
        mask_email(&request.email)
    );

    state
        .auth_service
        .signup(Role::Student, &request.name, &request.email, &request.password)
        .await
        .map_err(ApiError)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(SignupResponse {
        message: "Student account created successfully".to_string(),
    })))
}
