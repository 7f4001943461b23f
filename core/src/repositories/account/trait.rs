//! Account repository trait defining the interface for account persistence.
//!
//! The repository is the durable half of the credential store: lookup and
//! uniqueness enforcement, partitioned by role. Hashing and password
//! verification live in the credential service, not here.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual storage while maintaining the
/// abstraction boundary between domain and infrastructure layers. Emails
/// handed to this trait are already normalized; uniqueness is enforced
/// per (email, role) partition.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by normalized email within a role partition
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email and role
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str, role: Role) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// The write is atomic: either the full record is stored or nothing is.
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Auth(AuthError::DuplicateIdentity))` - An account
    ///   with that email already exists in the same role partition
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Check if an account exists with the given email and role
    async fn exists_by_email(&self, email: &str, role: Role) -> Result<bool, DomainError>;
}
