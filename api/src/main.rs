use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use cd_api::app::create_app;
use cd_api::routes::auth::AppState;
use cd_core::services::auth::{AuthService, AuthServiceConfig};
use cd_core::services::credential::CredentialService;
use cd_core::services::otp::{InMemoryOtpStore, OtpService};
use cd_core::services::token::{TokenService, TokenServiceConfig};
use cd_infra::database::{create_pool, MySqlAccountRepository};
use cd_infra::delivery::LogCodeDelivery;
use cd_shared::config::{DatabaseConfig, JwtConfig, OtpConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting CampusDesk API server");

    let server_config = ServerConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let otp_config = OtpConfig::from_env();

    if jwt_config.is_using_default_secret() {
        log::warn!("JWT_SECRET not set; using the development signing secret");
    }

    // Database-backed credential store
    let database_config = DatabaseConfig::from_env();
    let pool = create_pool(&database_config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let account_repository = Arc::new(MySqlAccountRepository::new(pool));

    // Process-wide OTP session store; swap in cd_infra's RedisOtpStore for
    // multi-instance deployments
    let otp_store = Arc::new(InMemoryOtpStore::new());

    // Code delivery; LogCodeDelivery is the development stand-in, see
    // cd_infra::delivery::HttpMailDelivery for the real transport
    let delivery = Arc::new(LogCodeDelivery::new());

    let auth_service = Arc::new(AuthService::new(
        CredentialService::new(account_repository),
        OtpService::new(otp_store, delivery, otp_config),
        Arc::new(TokenService::new(TokenServiceConfig::from(jwt_config))),
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
