//! Mock implementations for testing the authentication service

use async_trait::async_trait;
use std::sync::Mutex;

use crate::services::otp::CodeDelivery;

/// Delivery stub that records every delivered code
///
/// Stands in for the external delivery channel so tests can read the code
/// the way a student would read their inbox.
pub struct CaptureDelivery {
    pub deliveries: Mutex<Vec<(String, String)>>,
}

impl CaptureDelivery {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Last code delivered to the given identity
    pub fn code_for(&self, email: &str) -> Option<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    /// Total number of deliveries fired
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDelivery for CaptureDelivery {
    async fn deliver_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.deliveries
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(format!("capture-{}", self.delivery_count()))
    }
}
