//! Capability trait for the OTP session store

use async_trait::async_trait;

use crate::domain::entities::otp_entry::OtpEntry;
use crate::errors::DomainResult;

/// Store for pending one-time codes keyed by identity
///
/// Implementations must keep issuance and verification linearizable per
/// identity: at no point may two codes be simultaneously valid for the
/// same identity, and a consumed code must never verify again — even under
/// concurrent calls. The default backing is an in-process map; a shared
/// medium with per-key TTL and atomic compare-and-delete works the same
/// way for multi-instance deployments.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a freshly issued entry, replacing any prior entry for the
    /// same identity (the old code becomes invalid immediately)
    async fn put(&self, entry: OtpEntry) -> DomainResult<()>;

    /// Verify a candidate code for an identity
    ///
    /// Returns `false` when no entry exists, the entry is expired or
    /// consumed or out of attempts, or the code does not match. On a
    /// match the entry is consumed atomically: of any number of
    /// concurrent calls with the correct code, exactly one returns `true`.
    async fn verify(&self, email: &str, candidate: &str) -> DomainResult<bool>;

    /// Whether an active (unexpired, unconsumed) entry exists
    async fn pending(&self, email: &str) -> DomainResult<bool>;

    /// Drop any entry for the identity
    async fn clear(&self, email: &str) -> DomainResult<()>;
}
