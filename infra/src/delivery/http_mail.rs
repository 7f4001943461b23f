//! Mail gateway code delivery
//!
//! Sends one-time codes through an HTTP mail gateway (any transactional
//! mail provider with a JSON send endpoint). The gateway URL and API key
//! come from the environment; the body carries recipient, subject, and
//! the code message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use cd_core::services::otp::CodeDelivery;
use cd_shared::utils::validation::mask_email;

use crate::InfrastructureError;

/// Mail gateway configuration
#[derive(Debug, Clone)]
pub struct MailGatewayConfig {
    /// Gateway send endpoint URL
    pub endpoint: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// From address for outgoing mail
    pub from_address: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl MailGatewayConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let endpoint = std::env::var("MAIL_GATEWAY_URL")
            .map_err(|_| InfrastructureError::Config("MAIL_GATEWAY_URL not set".to_string()))?;
        let api_key = std::env::var("MAIL_GATEWAY_API_KEY")
            .map_err(|_| InfrastructureError::Config("MAIL_GATEWAY_API_KEY not set".to_string()))?;
        let from_address = std::env::var("MAIL_FROM_ADDRESS")
            .unwrap_or_else(|_| "no-reply@campusdesk.edu".to_string());

        Ok(Self {
            endpoint,
            api_key,
            from_address,
            request_timeout_secs: std::env::var("MAIL_GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

#[derive(Deserialize)]
struct SendMailResponse {
    id: String,
}

/// Code delivery over an HTTP mail gateway
pub struct HttpMailDelivery {
    client: reqwest::Client,
    config: MailGatewayConfig,
}

impl HttpMailDelivery {
    /// Create a new mail gateway delivery
    pub fn new(config: MailGatewayConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(from = %config.from_address, "Mail gateway delivery initialized");
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailGatewayConfig::from_env()?)
    }
}

#[async_trait]
impl CodeDelivery for HttpMailDelivery {
    async fn deliver_code(&self, email: &str, code: &str) -> Result<String, String> {
        let body = SendMailRequest {
            from: &self.config.from_address,
            to: email,
            subject: "Your CampusDesk verification code",
            text: format!(
                "Your verification code is {}. It expires in a few minutes; \
                 if you did not request it, ignore this message.",
                code
            ),
        };

        debug!(email = %mask_email(email), "Sending verification mail");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Mail gateway request failed");
                format!("mail gateway request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Mail gateway rejected the message");
            return Err(format!("mail gateway returned {}", status));
        }

        let parsed: SendMailResponse = response
            .json()
            .await
            .map_err(|e| format!("mail gateway response unreadable: {}", e))?;

        info!(
            email = %mask_email(email),
            message_id = %parsed.id,
            "Verification mail accepted by gateway"
        );
        Ok(parsed.id)
    }
}
