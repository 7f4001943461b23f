//! Scenario tests for the login state machine

use std::sync::Arc;

use cd_shared::config::OtpConfig;

use crate::domain::entities::account::Role;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::MockAccountRepository;
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::credential::CredentialService;
use crate::services::otp::{InMemoryOtpStore, OtpService};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::CaptureDelivery;

type TestAuthService = AuthService<MockAccountRepository, InMemoryOtpStore, CaptureDelivery>;

struct Harness {
    service: Arc<TestAuthService>,
    delivery: Arc<CaptureDelivery>,
}

fn harness() -> Harness {
    harness_with_ttl(5)
}

fn harness_with_ttl(ttl_minutes: i64) -> Harness {
    let delivery = Arc::new(CaptureDelivery::new());
    let repository = Arc::new(MockAccountRepository::new());
    let otp_config = OtpConfig { ttl_minutes };

    let service = AuthService::new(
        CredentialService::new(repository),
        OtpService::new(
            Arc::new(InMemoryOtpStore::new()),
            Arc::clone(&delivery),
            otp_config,
        ),
        Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiry_seconds: 86_400,
            issuer: "campus-desk".to_string(),
        })),
        AuthServiceConfig::default(),
    );

    Harness {
        service: Arc::new(service),
        delivery,
    }
}

#[tokio::test]
async fn test_duplicate_signup_same_partition_fails() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw1234")
        .await
        .unwrap();

    let result = h
        .service
        .signup(Role::Student, "Alice Again", "a@x.com", "pw5678")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateIdentity))
    ));
}

#[tokio::test]
async fn test_same_email_different_role_succeeds() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw1234")
        .await
        .unwrap();
    let admin = h
        .service
        .signup(Role::Admin, "Alice (staff)", "a@x.com", "pw1234")
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);
}

#[tokio::test]
async fn test_signup_validation() {
    let h = harness();

    let result = h.service.signup(Role::Student, "  ", "a@x.com", "pw1234").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::RequiredField { .. }))
    ));

    let result = h
        .service
        .signup(Role::Student, "Alice", "not-an-email", "pw1234")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::InvalidEmail))
    ));

    let result = h.service.signup(Role::Student, "Alice", "a@x.com", "pw").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::InvalidLength { .. }))
    ));
}

#[tokio::test]
async fn test_student_full_flow_and_replay_rejection() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();

    // Password step returns a pending challenge, not a token
    let outcome = h
        .service
        .login_password(Role::Student, "a@x.com", "pw123456")
        .await
        .unwrap();
    assert!(outcome.is_otp_pending());

    let code = h.delivery.code_for("a@x.com").expect("code was delivered");

    // First verification mints a token
    let response = h.service.verify_otp("a@x.com", &code).await.unwrap();
    assert_eq!(response.role, "student");
    assert!(!response.token.is_empty());

    let claims = h.service.token_service().verify_token(&response.token).unwrap();
    assert_eq!(claims.account_role(), Some(Role::Student));

    // Replaying the same correct code fails
    let replay = h.service.verify_otp("a@x.com", &code).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::InvalidOtp))
    ));
}

#[tokio::test]
async fn test_student_login_wrong_password() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();

    let result = h
        .service
        .login_password(Role::Student, "a@x.com", "wrong-pass")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::BadCredentials))
    ));
    // No code leaves the building on a failed password step
    assert_eq!(h.delivery.delivery_count(), 0);
}

#[tokio::test]
async fn test_unknown_identity() {
    let h = harness();
    let result = h
        .service
        .login_password(Role::Student, "ghost@x.com", "pw123456")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
}

#[tokio::test]
async fn test_admin_login_skips_otp() {
    let h = harness();
    h.service
        .signup(Role::Admin, "Dean", "dean@x.com", "pw123456")
        .await
        .unwrap();

    let outcome = h
        .service
        .login_password(Role::Admin, "dean@x.com", "pw123456")
        .await
        .unwrap();

    let response = outcome.into_authenticated().expect("admin gets a token");
    assert_eq!(response.role, "admin");
    assert_eq!(h.delivery.delivery_count(), 0);

    let claims = h.service.token_service().verify_token(&response.token).unwrap();
    assert_eq!(claims.account_role(), Some(Role::Admin));
}

#[tokio::test]
async fn test_student_login_always_issues_otp() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();

    for expected in 1..=3usize {
        h.service
            .login_password(Role::Student, "a@x.com", "pw123456")
            .await
            .unwrap();
        assert_eq!(h.delivery.delivery_count(), expected);
    }
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();

    h.service
        .login_password(Role::Student, "a@x.com", "pw123456")
        .await
        .unwrap();
    let first = h.delivery.code_for("a@x.com").unwrap();

    h.service
        .login_password(Role::Student, "a@x.com", "pw123456")
        .await
        .unwrap();
    let second = h.delivery.code_for("a@x.com").unwrap();

    if first != second {
        let stale = h.service.verify_otp("a@x.com", &first).await;
        assert!(matches!(
            stale,
            Err(DomainError::Auth(AuthError::InvalidOtp))
        ));
    }
    assert!(h.service.verify_otp("a@x.com", &second).await.is_ok());
}

#[tokio::test]
async fn test_expired_code_rejected() {
    let h = harness_with_ttl(0);
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();
    h.service
        .login_password(Role::Student, "a@x.com", "pw123456")
        .await
        .unwrap();
    let code = h.delivery.code_for("a@x.com").unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let result = h.service.verify_otp("a@x.com", &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOtp))
    ));
}

#[tokio::test]
async fn test_email_identity_is_case_insensitive() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "Alice@X.com", "pw123456")
        .await
        .unwrap();

    let outcome = h
        .service
        .login_password(Role::Student, "alice@x.com", "pw123456")
        .await
        .unwrap();
    assert!(outcome.is_otp_pending());

    let code = h.delivery.code_for("alice@x.com").unwrap();
    assert!(h.service.verify_otp("ALICE@x.com", &code).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_otp_verification_single_winner() {
    let h = harness();
    h.service
        .signup(Role::Student, "Alice", "a@x.com", "pw123456")
        .await
        .unwrap();
    h.service
        .login_password(Role::Student, "a@x.com", "pw123456")
        .await
        .unwrap();
    let code = h.delivery.code_for("a@x.com").unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&h.service);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service.verify_otp("a@x.com", &code).await.is_ok()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}
