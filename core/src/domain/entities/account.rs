//! Account entity representing a registered user of the complaint desk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of an account in the system
///
/// Email uniqueness and the authentication flow are partitioned by role:
/// a student and an admin may share an email, and only students go through
/// the OTP second factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A student filing and tracking complaints
    Student,
    /// An administrator triaging complaints
    Admin,
}

impl Role {
    /// Stable string form used in token claims and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    /// Parse a role from its stable string form
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account entity representing a registered user
///
/// The password is stored only as a salted one-way hash; the raw password
/// never leaves the credential service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (lowercase) email address, unique within the role partition
    pub email: String,

    /// Salted bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role of the account (Student or Admin)
    pub role: Role,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance
    ///
    /// The caller is responsible for handing over an already-hashed
    /// password and a normalized email.
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Checks if the account is a student
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// Checks if the account is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_creation() {
        let account = Account::new(
            "Alice".to_string(),
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            Role::Student,
        );

        assert_eq!(account.name, "Alice");
        assert_eq!(account.email, "a@x.com");
        assert_eq!(account.role, Role::Student);
        assert!(account.is_student());
        assert!(!account.is_admin());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("other"), None);
        assert_eq!(Role::Student.as_str(), "student");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Student).unwrap();
        assert_eq!(json, "\"student\"");
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account::new(
            "Alice".to_string(),
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            Role::Student,
        );
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$hash"));
    }
}
