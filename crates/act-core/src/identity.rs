//! # Identity Provider Trait
//!
//! Capability interface for the external identity provider. The auth
//! actions are pass-throughs: they hand credentials to an implementation of
//! this trait and surface whatever it returns. The provider's internal
//! behavior (token issuance, email delivery) lives behind this boundary.

use crate::error::ActionResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Email/password credential pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Tokens returned by a successful password sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
}

/// Core trait for identity provider implementations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new user. `email_redirect_to` is where the confirmation
    /// email should send the user.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        email_redirect_to: Option<&str>,
    ) -> ActionResult<()>;

    /// Sign in with email and password.
    async fn sign_in_with_password(&self, credentials: &Credentials) -> ActionResult<AuthSession>;

    /// Send a password-reset email. `redirect_to` is where the reset link
    /// should land.
    async fn send_password_reset(&self, email: &str, redirect_to: Option<&str>) -> ActionResult<()>;

    /// Update the password of the user identified by `access_token`.
    async fn update_password(&self, access_token: &str, new_password: &str) -> ActionResult<()>;

    /// Invalidate the session identified by `access_token`.
    async fn sign_out(&self, access_token: &str) -> ActionResult<()>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed identity provider (dynamic dispatch)
pub type BoxedIdentityProvider = Arc<dyn IdentityProvider>;
