//! Main authentication service implementation

use std::sync::Arc;

use cd_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::account::{Account, Role};
use crate::domain::value_objects::{AuthResponse, LoginOutcome};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::credential::CredentialService;
use crate::services::otp::{CodeDelivery, OtpService, OtpStore};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service driving the login state machine
///
/// Per attempt the flow is `AWAITING_PASSWORD -> AWAITING_OTP ->
/// AUTHENTICATED` for students and `AWAITING_PASSWORD -> AUTHENTICATED`
/// for admins: the OTP is a student-only second factor, and the skip is
/// the single role branch in `login_password`. OTP expiry acts as the
/// timeout on the `AWAITING_OTP` state.
pub struct AuthService<A, O, D>
where
    A: AccountRepository,
    O: OtpStore,
    D: CodeDelivery,
{
    /// Credential store: account persistence plus password hashing
    credentials: CredentialService<A>,
    /// OTP issuance and verification
    otp_service: OtpService<O, D>,
    /// Session token minting
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<A, O, D> AuthService<A, O, D>
where
    A: AccountRepository,
    O: OtpStore,
    D: CodeDelivery,
{
    /// Create a new authentication service
    pub fn new(
        credentials: CredentialService<A>,
        otp_service: OtpService<O, D>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            credentials,
            otp_service,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// Validates the input, normalizes the email, and delegates to the
    /// credential store. Duplicate identities within the role partition
    /// fail with `DuplicateIdentity`.
    pub async fn signup(
        &self,
        role: Role,
        name: &str,
        email: &str,
        raw_password: &str,
    ) -> DomainResult<Account> {
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if raw_password.len() < self.config.min_password_length
            || raw_password.len() > self.config.max_password_length
        {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                max: self.config.max_password_length,
            }
            .into());
        }

        let email = normalize_email(email);
        self.credentials
            .register(role, name.trim(), &email, raw_password)
            .await
    }

    /// Authenticate by password
    ///
    /// Single entry point for both roles, dispatching on the `role` tag:
    /// students get a one-time code issued into the session store and an
    /// `OtpPending` outcome; admins skip the second factor and receive a
    /// session token directly. No token is ever minted on a partial
    /// success.
    pub async fn login_password(
        &self,
        role: Role,
        email: &str,
        raw_password: &str,
    ) -> DomainResult<LoginOutcome> {
        let email = normalize_email(email);
        let account = self.credentials.authenticate(role, &email, raw_password).await?;

        match account.role {
            Role::Student => {
                let challenge = self.otp_service.issue(&account.email).await?;
                tracing::info!(
                    email = %mask_email(&account.email),
                    event = "login_awaiting_otp",
                    "Password accepted, awaiting second factor"
                );
                Ok(LoginOutcome::OtpPending(challenge))
            }
            Role::Admin => {
                let response = self.mint_session(&account)?;
                tracing::info!(
                    email = %mask_email(&account.email),
                    event = "admin_authenticated",
                    "Admin login complete"
                );
                Ok(LoginOutcome::Authenticated(response))
            }
        }
    }

    /// Verify a student's one-time code and complete authentication
    ///
    /// All rejection reasons (missing, expired, consumed, mismatched)
    /// collapse to `InvalidOtp`; only a fresh match mints a token.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        if !self.otp_service.verify(&email, code).await? {
            return Err(AuthError::InvalidOtp.into());
        }

        // The code only ever existed because a student login issued it, so
        // a missing account here means it was removed mid-flow; the code
        // is spent either way.
        let account = self
            .credentials
            .find(&email, Role::Student)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        let response = self.mint_session(&account)?;
        tracing::info!(
            email = %mask_email(&email),
            event = "student_authenticated",
            "Student login complete"
        );
        Ok(response)
    }

    /// Mint a session token for an authenticated account
    fn mint_session(&self, account: &Account) -> DomainResult<AuthResponse> {
        let token = self.token_service.mint_token(account.id, account.role)?;
        Ok(AuthResponse::new(
            token,
            self.token_service.token_expiry_seconds(),
            account.role.as_str(),
        ))
    }

    /// The token service used for minting, shared with verification consumers
    pub fn token_service(&self) -> Arc<TokenService> {
        Arc::clone(&self.token_service)
    }
}
