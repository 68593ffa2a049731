//! # HTTP Identity Client
//!
//! Pass-through client for a GoTrue-style identity API. Every operation is
//! one request; the provider owns accounts, tokens, and email delivery.

use crate::config::IdentityConfig;
use act_core::{ActionError, ActionResult, AuthSession, Credentials, IdentityProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Client-level deadline for identity requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP identity provider
pub struct HttpIdentityProvider {
    config: IdentityConfig,
    client: Client,
}

impl HttpIdentityProvider {
    /// Create a new identity client
    pub fn new(config: IdentityConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ActionResult<Self> {
        let config = IdentityConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Read the body and map a non-success status to an identity error
    /// carrying the provider's message.
    async fn check(&self, response: reqwest::Response, operation: &str) -> ActionResult<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(normalize_transport_error)?;

        if status.is_success() {
            debug!("Identity {} succeeded: status={}", operation, status);
            return Ok(body);
        }

        let message = extract_error_message(&body).unwrap_or_else(|| body.clone());
        error!(
            "Identity {} rejected: status={}, message={}",
            operation, status, message
        );
        Err(ActionError::Identity(message))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    #[instrument(skip(self, credentials))]
    async fn sign_up(
        &self,
        credentials: &Credentials,
        email_redirect_to: Option<&str>,
    ) -> ActionResult<()> {
        let mut request = self.client.post(self.config.endpoint("/signup"));
        if let Some(redirect_to) = email_redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }

        let response = request
            .header("apikey", &self.config.api_key)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(normalize_transport_error)?;

        self.check(response, "sign-up").await.map(|_| ())
    }

    #[instrument(skip(self, credentials))]
    async fn sign_in_with_password(&self, credentials: &Credentials) -> ActionResult<AuthSession> {
        let response = self
            .client
            .post(self.config.endpoint("/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(normalize_transport_error)?;

        let body = self.check(response, "sign-in").await?;

        serde_json::from_str(&body).map_err(|e| {
            ActionError::Identity(format!("Failed to parse sign-in response: {e}"))
        })
    }

    #[instrument(skip(self))]
    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> ActionResult<()> {
        let mut request = self.client.post(self.config.endpoint("/recover"));
        if let Some(redirect_to) = redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }

        let response = request
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(normalize_transport_error)?;

        self.check(response, "password-reset").await.map(|_| ())
    }

    #[instrument(skip(self, access_token, new_password))]
    async fn update_password(&self, access_token: &str, new_password: &str) -> ActionResult<()> {
        let response = self
            .client
            .put(self.config.endpoint("/user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await
            .map_err(normalize_transport_error)?;

        self.check(response, "password-update").await.map(|_| ())
    }

    #[instrument(skip(self, access_token))]
    async fn sign_out(&self, access_token: &str) -> ActionResult<()> {
        let response = self
            .client
            .post(self.config.endpoint("/logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        self.check(response, "sign-out").await.map(|_| ())
    }

    fn provider_name(&self) -> &'static str {
        "gotrue"
    }
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

fn normalize_transport_error(err: reqwest::Error) -> ActionError {
    if err.is_timeout() {
        ActionError::Timeout(REQUEST_TIMEOUT.as_millis() as u64)
    } else {
        ActionError::Network(err.to_string())
    }
}

/// Identity APIs disagree on the error-message field; try the usual names.
fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "msg", "error_description", "error"] {
        if let Some(message) = json.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}
