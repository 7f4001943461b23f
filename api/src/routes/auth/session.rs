use actix_web::HttpResponse;

use cd_shared::types::response::ApiResponse;

use crate::dto::SessionResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/session
///
/// Introspects the bearer token the `JwtAuth` middleware already
/// verified. Downstream complaint endpoints authorize the same way.
pub async fn current_session(context: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(SessionResponse {
        account_id: context.account_id.to_string(),
        role: context.role.as_str().to_string(),
    }))
}
