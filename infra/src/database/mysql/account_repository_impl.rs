//! MySQL implementation of the AccountRepository trait.
//!
//! Uniqueness within a role partition is backed by a composite unique key
//! on `(email, role)`; a duplicate insert surfaces as `DuplicateIdentity`
//! rather than a bare database error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cd_core::domain::entities::account::{Account, Role};
use cd_core::errors::{AuthError, DomainError};
use cd_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::column_error("id", e))?;
        let role_str: String = row
            .try_get("role")
            .map_err(|e| Self::column_error("role", e))?;

        let role = Role::parse(&role_str).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown role value in accounts table: {}", role_str),
        })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in accounts table: {}", e),
            })?,
            name: row
                .try_get("name")
                .map_err(|e| Self::column_error("name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| Self::column_error("password_hash", e))?,
            role,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::column_error("created_at", e))?,
        })
    }

    fn column_error(column: &str, e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("Failed to read column {}: {}", column, e),
        }
    }

    fn query_error(e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("Database query failed: {}", e),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str, role: Role) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM accounts
            WHERE email = ? AND role = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM accounts
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (id, name, email, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            // The UNIQUE (email, role) key turns a race between two signups
            // into a clean duplicate error for the loser
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::Auth(AuthError::DuplicateIdentity))
            }
            Err(e) => Err(Self::query_error(e)),
        }
    }

    async fn exists_by_email(&self, email: &str, role: Role) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS cnt
            FROM accounts
            WHERE email = ? AND role = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(Self::query_error)?;

        let count: i64 = row.try_get("cnt").map_err(|e| Self::column_error("cnt", e))?;
        Ok(count > 0)
    }
}
