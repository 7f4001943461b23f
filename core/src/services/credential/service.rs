//! Credential service implementation

use std::sync::Arc;

use cd_shared::utils::validation::mask_email;

use crate::domain::entities::account::{Account, Role};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;

/// Credential service handling account registration and password checks
///
/// Wraps the account repository with bcrypt hashing. Lookup semantics
/// (role partitioning, normalized emails) come from the repository; this
/// service only ever sees emails the auth layer already normalized.
pub struct CredentialService<A: AccountRepository> {
    repository: Arc<A>,
}

impl<A: AccountRepository> CredentialService<A> {
    /// Create a new credential service
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Register a new account
    ///
    /// Hashes the password with bcrypt and persists the record. Fails with
    /// `DuplicateIdentity` if the email is taken within the role partition.
    pub async fn register(
        &self,
        role: Role,
        name: &str,
        email: &str,
        raw_password: &str,
    ) -> DomainResult<Account> {
        if self.repository.exists_by_email(email, role).await? {
            tracing::info!(
                email = %mask_email(email),
                role = %role,
                event = "signup_duplicate",
                "Rejected signup for already-registered email"
            );
            return Err(AuthError::DuplicateIdentity.into());
        }

        let password_hash =
            bcrypt::hash(raw_password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;

        let account = Account::new(name.to_string(), email.to_string(), password_hash, role);
        let account = self.repository.create(account).await?;

        tracing::info!(
            email = %mask_email(email),
            role = %role,
            account_id = %account.id,
            event = "account_created",
            "Registered new account"
        );

        Ok(account)
    }

    /// Authenticate an account by password
    ///
    /// Returns the account on success, `AccountNotFound` if no account
    /// exists in the partition, and `BadCredentials` on a hash mismatch.
    /// bcrypt's verify performs the comparison in constant time.
    pub async fn authenticate(
        &self,
        role: Role,
        email: &str,
        raw_password: &str,
    ) -> DomainResult<Account> {
        let account = self
            .repository
            .find_by_email(email, role)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let matches =
            bcrypt::verify(raw_password, &account.password_hash).map_err(|e| {
                DomainError::Internal {
                    message: format!("Password verification failed: {}", e),
                }
            })?;

        if !matches {
            tracing::warn!(
                email = %mask_email(email),
                role = %role,
                event = "password_mismatch",
                "Password login failed"
            );
            return Err(AuthError::BadCredentials.into());
        }

        Ok(account)
    }

    /// Look up an account by email within a role partition
    pub async fn find(&self, email: &str, role: Role) -> DomainResult<Option<Account>> {
        self.repository.find_by_email(email, role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAccountRepository;

    fn service() -> CredentialService<MockAccountRepository> {
        CredentialService::new(Arc::new(MockAccountRepository::new()))
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let account = service
            .register(Role::Student, "Alice", "a@x.com", "pw123")
            .await
            .unwrap();

        assert_ne!(account.password_hash, "pw123");
        assert!(bcrypt::verify("pw123", &account.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_fails() {
        let service = service();
        service
            .register(Role::Student, "Alice", "a@x.com", "pw123")
            .await
            .unwrap();

        let result = service
            .register(Role::Student, "Alice Again", "a@x.com", "other")
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::DuplicateIdentity))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = service();
        let created = service
            .register(Role::Admin, "Dean", "dean@x.com", "s3cret")
            .await
            .unwrap();

        let account = service
            .authenticate(Role::Admin, "dean@x.com", "s3cret")
            .await
            .unwrap();
        assert_eq!(account.id, created.id);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service();
        service
            .register(Role::Student, "Alice", "a@x.com", "pw123")
            .await
            .unwrap();

        let result = service.authenticate(Role::Student, "a@x.com", "wrong").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::BadCredentials))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service();
        let result = service
            .authenticate(Role::Student, "ghost@x.com", "pw123")
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::AccountNotFound))
        ));
    }
}
