//! One-time password entry for the student second-factor challenge.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed per entry
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for one-time codes (5 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Pending second-factor challenge for a single identity
///
/// At most one entry is active per identity; issuing a new entry replaces
/// the previous one wholesale. An entry stops verifying once it is
/// consumed, expired, or out of attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    /// Unique identifier for this challenge
    pub id: Uuid,

    /// Normalized email the code was issued for
    pub email: String,

    /// The 6-digit one-time code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,
}

impl OtpEntry {
    /// Creates a new entry with a cryptographically secure random code
    pub fn new(email: String) -> Self {
        Self::new_with_ttl(email, DEFAULT_TTL_MINUTES)
    }

    /// Creates a new entry with a custom time-to-live in minutes
    pub fn new_with_ttl(email: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            consumed: false,
        }
    }

    /// Generates a random 6-digit code from the OS CSPRNG
    ///
    /// A predictable code source would let an attacker skip the second
    /// factor entirely, so this never falls back to a seeded generator.
    fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", num)
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the entry can still be verified
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.consumed && self.attempts < MAX_ATTEMPTS
    }

    /// Verifies a candidate code against this entry
    ///
    /// Increments the attempt counter on a mismatch and marks the entry
    /// consumed on a match. Returns `false` for an expired, consumed, or
    /// exhausted entry regardless of the candidate. The comparison is
    /// constant-time.
    pub fn verify(&mut self, candidate: &str) -> bool {
        if !self.is_active() {
            return false;
        }

        self.attempts += 1;

        if self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
        {
            self.consumed = true;
            true
        } else {
            false
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Seconds until expiry, used for store-level TTLs
    pub fn ttl_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
