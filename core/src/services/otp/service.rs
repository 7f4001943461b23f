//! OTP issuance and verification service

use std::sync::Arc;

use cd_shared::config::OtpConfig;
use cd_shared::utils::validation::mask_email;

use crate::domain::entities::otp_entry::OtpEntry;
use crate::domain::value_objects::OtpChallenge;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::delivery::CodeDelivery;
use super::store::OtpStore;

/// Service managing the lifecycle of one-time codes
///
/// Issuance generates a fresh entry, stores it (replacing any prior entry
/// for the identity), and fires the delivery collaborator. Verification
/// delegates to the store, which owns the one-shot consume semantics.
pub struct OtpService<O: OtpStore, D: CodeDelivery> {
    store: Arc<O>,
    delivery: Arc<D>,
    config: OtpConfig,
}

impl<O: OtpStore, D: CodeDelivery> OtpService<O, D> {
    /// Create a new OTP service
    pub fn new(store: Arc<O>, delivery: Arc<D>, config: OtpConfig) -> Self {
        Self {
            store,
            delivery,
            config,
        }
    }

    /// Issue a new code for an identity and trigger delivery
    ///
    /// Any previously issued code for the identity is invalidated before
    /// the new one becomes visible. If delivery fails the entry is cleared
    /// again so a retry starts from a clean slate.
    pub async fn issue(&self, email: &str) -> DomainResult<OtpChallenge> {
        let entry = OtpEntry::new_with_ttl(email.to_string(), self.config.ttl_minutes);
        let code = entry.code.clone();
        let expires_at = entry.expires_at;

        self.store.put(entry).await?;

        tracing::info!(
            email = %mask_email(email),
            event = "otp_issued",
            "Issued one-time code"
        );

        if let Err(e) = self.delivery.deliver_code(email, &code).await {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "otp_delivery_failed",
                "Could not deliver one-time code"
            );
            let _ = self.store.clear(email).await;
            return Err(AuthError::DeliveryFailure.into());
        }

        Ok(OtpChallenge {
            email: email.to_string(),
            expires_at,
        })
    }

    /// Verify a candidate code for an identity
    ///
    /// One-shot: a second call with the same correct code fails. Expired,
    /// consumed, mismatched, and absent entries are indistinguishable to
    /// the caller.
    pub async fn verify(&self, email: &str, candidate: &str) -> DomainResult<bool> {
        let matched = self
            .store
            .verify(email, candidate)
            .await
            .map_err(|e| match e {
                DomainError::Internal { message } => DomainError::Internal {
                    message: format!("OTP store failure: {}", message),
                },
                other => other,
            })?;

        if matched {
            tracing::info!(
                email = %mask_email(email),
                event = "otp_verified",
                "One-time code verified"
            );
        } else {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_rejected",
                "One-time code rejected"
            );
        }

        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::otp::InMemoryOtpStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Delivery stub that records delivered codes
    struct CaptureDelivery {
        codes: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl CaptureDelivery {
        fn new() -> Self {
            Self {
                codes: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                codes: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn last_code(&self) -> Option<String> {
            self.codes.lock().unwrap().last().map(|(_, c)| c.clone())
        }
    }

    #[async_trait]
    impl CodeDelivery for CaptureDelivery {
        async fn deliver_code(&self, email: &str, code: &str) -> Result<String, String> {
            if self.fail {
                return Err("provider unavailable".to_string());
            }
            self.codes
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
            Ok("capture-1".to_string())
        }
    }

    fn service(
        delivery: Arc<CaptureDelivery>,
    ) -> OtpService<InMemoryOtpStore, CaptureDelivery> {
        OtpService::new(
            Arc::new(InMemoryOtpStore::new()),
            delivery,
            OtpConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_issue_delivers_and_verifies_once() {
        let delivery = Arc::new(CaptureDelivery::new());
        let service = service(Arc::clone(&delivery));

        service.issue("a@x.com").await.unwrap();
        let code = delivery.last_code().unwrap();

        assert!(service.verify("a@x.com", &code).await.unwrap());
        assert!(!service.verify("a@x.com", &code).await.unwrap());
    }

    #[tokio::test]
    async fn test_reissue_invalidates_previous() {
        let delivery = Arc::new(CaptureDelivery::new());
        let service = service(Arc::clone(&delivery));

        service.issue("a@x.com").await.unwrap();
        let first = delivery.last_code().unwrap();

        service.issue("a@x.com").await.unwrap();
        let second = delivery.last_code().unwrap();

        if first != second {
            assert!(!service.verify("a@x.com", &first).await.unwrap());
        }
        assert!(service.verify("a@x.com", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_delivery_failure_clears_entry() {
        let delivery = Arc::new(CaptureDelivery::failing());
        let store = Arc::new(InMemoryOtpStore::new());
        let service = OtpService::new(Arc::clone(&store), delivery, OtpConfig::default());

        let result = service.issue("a@x.com").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::DeliveryFailure))
        ));
        assert!(!store.pending("a@x.com").await.unwrap());
    }
}
