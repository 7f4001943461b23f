//! Application factory
//!
//! Builds the actix-web application from an already-wired `AppState`, so
//! the binary and the integration tests assemble the exact same routes.

use actix_web::body::MessageBody;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use cd_core::repositories::AccountRepository;
use cd_core::services::otp::{CodeDelivery, OtpStore};
use cd_shared::types::response::ErrorResponse;

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{
    admin_login::admin_login, session::current_session, signup::student_signup,
    student_login::student_login, verify_otp::verify_otp, AppState,
};

/// Create and configure the application with all routes
pub fn create_app<A, O, D>(
    app_state: web::Data<AppState<A, O, D>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    O: OtpStore + 'static,
    D: CodeDelivery + 'static,
{
    let token_service = app_state.auth_service.token_service();
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/student/signup", web::post().to(student_signup::<A, O, D>))
                    .route("/student/login", web::post().to(student_login::<A, O, D>))
                    .route(
                        "/student/verify-otp",
                        web::post().to(verify_otp::<A, O, D>),
                    )
                    .route("/admin/login", web::post().to(admin_login::<A, O, D>))
                    .service(
                        web::resource("/session")
                            .route(web::get().to(current_session))
                            .wrap(JwtAuth::new(token_service)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "campus-desk-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
