//! Redis-backed OTP session store
//!
//! Backs the OTP capability with a shared medium so multiple service
//! instances agree on pending codes. Expiry rides on Redis key TTLs;
//! one-shot consumption is a Lua compare-and-delete, which Redis runs
//! atomically, so concurrent verifies across processes still elect a
//! single winner.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::Script;
use serde::{Deserialize, Serialize};

use cd_core::domain::entities::otp_entry::{OtpEntry, MAX_ATTEMPTS};
use cd_core::errors::{DomainError, DomainResult};
use cd_core::services::otp::OtpStore;

use crate::cache::RedisClient;

/// Redis key prefix for pending codes
const OTP_KEY_PREFIX: &str = "otp:pending";

// Atomic verify: miss, attempt bump, and consume happen in one script.
// Returns 1 on a match (entry deleted), 0 otherwise.
static VERIFY_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local raw = redis.call('GET', KEYS[1])
        if not raw then
            return 0
        end
        local entry = cjson.decode(raw)
        if entry.attempts >= tonumber(ARGV[2]) then
            redis.call('DEL', KEYS[1])
            return 0
        end
        if entry.code == ARGV[1] then
            redis.call('DEL', KEYS[1])
            return 1
        end
        entry.attempts = entry.attempts + 1
        local ttl = redis.call('TTL', KEYS[1])
        if ttl > 0 then
            redis.call('SET', KEYS[1], cjson.encode(entry), 'EX', ttl)
        end
        return 0
        "#,
    )
});

/// Wire form of a pending entry inside Redis
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    code: String,
    attempts: i32,
}

/// OTP store backed by Redis with per-key TTL
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    /// Create a new Redis-backed OTP store
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn format_key(email: &str) -> String {
        format!("{}:{}", OTP_KEY_PREFIX, email)
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, entry: OtpEntry) -> DomainResult<()> {
        let key = Self::format_key(&entry.email);
        let ttl = entry.ttl_seconds();

        if ttl <= 0 {
            // Entry is already dead on arrival; make sure no stale key lingers
            self.client.delete(&key).await.map_err(DomainError::from)?;
            return Ok(());
        }

        let stored = StoredEntry {
            code: entry.code,
            attempts: entry.attempts,
        };
        let raw = serde_json::to_string(&stored).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode OTP entry: {}", e),
        })?;

        // SETEX replaces any previous entry and stamps the new TTL in one go
        self.client
            .set_with_expiry(&key, &raw, ttl as u64)
            .await
            .map_err(DomainError::from)?;
        Ok(())
    }

    async fn verify(&self, email: &str, candidate: &str) -> DomainResult<bool> {
        let key = Self::format_key(email);
        let max_attempts = MAX_ATTEMPTS.to_string();

        let result = self
            .client
            .eval_on_key(&VERIFY_SCRIPT, &key, &[candidate, &max_attempts])
            .await
            .map_err(DomainError::from)?;

        Ok(result == 1)
    }

    async fn pending(&self, email: &str) -> DomainResult<bool> {
        let key = Self::format_key(email);
        self.client.exists(&key).await.map_err(DomainError::from)
    }

    async fn clear(&self, email: &str) -> DomainResult<()> {
        let key = Self::format_key(email);
        self.client.delete(&key).await.map_err(DomainError::from)
    }
}
