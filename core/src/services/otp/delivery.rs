//! Code delivery collaborator trait

use async_trait::async_trait;

/// Transport for getting a one-time code to its user
///
/// Delivery (email, SMS, carrier pigeon) is an external collaborator the
/// auth service calls but does not implement. The service only guarantees
/// the code exists in the store; how it reaches the user is behind this
/// seam. Implementations must not persist the code.
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    /// Deliver a one-time code to the given identity
    ///
    /// Returns a provider message id on success and a human-opaque error
    /// string on failure.
    async fn deliver_code(&self, email: &str, code: &str) -> Result<String, String>;
}
