//! In-memory implementation of AccountRepository for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// In-memory account repository
///
/// Keyed by account id; uniqueness is checked over the (email, role)
/// partition on every create, matching the durable implementations.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository pre-seeded with accounts
    pub async fn with_accounts(accounts: Vec<Account>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.accounts.write().await;
            for account in accounts {
                map.insert(account.id, account);
            }
        }
        repo
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str, role: Role) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email == email && a.role == role)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email == account.email && a.role == account.role)
        {
            return Err(DomainError::Auth(AuthError::DuplicateIdentity));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn exists_by_email(&self, email: &str, role: Role) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.email == email && a.role == role))
    }
}
