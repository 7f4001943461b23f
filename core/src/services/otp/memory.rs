//! Process-wide in-memory OTP store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_entry::OtpEntry;
use crate::errors::DomainResult;

use super::store::OtpStore;

/// In-memory OTP store keyed by normalized email
///
/// Verification takes the write lock, so concurrent verifies for the same
/// identity serialize and exactly one can observe an unconsumed entry.
/// Expired entries are purged lazily on the next lookup for that identity.
pub struct InMemoryOtpStore {
    entries: Arc<RwLock<HashMap<String, OtpEntry>>>,
}

impl InMemoryOtpStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, entry: OtpEntry) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        // Insert replaces any prior entry wholesale; the old code dies here
        entries.insert(entry.email.clone(), entry);
        Ok(())
    }

    async fn verify(&self, email: &str, candidate: &str) -> DomainResult<bool> {
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get_mut(email) else {
            return Ok(false);
        };

        if entry.is_expired() {
            entries.remove(email);
            return Ok(false);
        }

        let matched = entry.verify(candidate);
        if matched {
            // Consumed entries have no further use; drop them eagerly
            entries.remove(email);
        }
        Ok(matched)
    }

    async fn pending(&self, email: &str) -> DomainResult<bool> {
        let mut entries = self.entries.write().await;
        match entries.get(email) {
            Some(entry) if entry.is_expired() => {
                entries.remove(email);
                Ok(false)
            }
            Some(entry) => Ok(entry.is_active()),
            None => Ok(false),
        }
    }

    async fn clear(&self, email: &str) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(email);
        Ok(())
    }
}
