//! Log-based code delivery for development
//!
//! Prints the code to the service log instead of sending it anywhere.
//! Development-only: this is the single place in the system where a code
//! is written out in the clear, and wiring it into a production build
//! would hand the second factor to anyone who can read logs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

use cd_core::services::otp::CodeDelivery;

/// Development delivery that logs codes instead of sending them
pub struct LogCodeDelivery {
    /// Counter for generated message ids
    counter: AtomicU64,
}

impl LogCodeDelivery {
    /// Create a new log delivery
    pub fn new() -> Self {
        warn!("Using log-based code delivery; codes will appear in the service log");
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for LogCodeDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeDelivery for LogCodeDelivery {
    async fn deliver_code(&self, email: &str, code: &str) -> Result<String, String> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        info!(email = email, code = code, "One-time code (dev delivery)");
        Ok(format!("log-{}", id))
    }
}
