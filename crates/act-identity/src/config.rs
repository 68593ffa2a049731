//! # Identity Provider Configuration

use act_core::{ActionError, ActionResult, ConfigProvider, EnvConfig};

/// Identity API configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity API (e.g. `https://auth.example.com/auth/v1`)
    pub api_url: String,

    /// Public API key sent in the `apikey` header
    pub api_key: String,
}

impl IdentityConfig {
    /// Required: base URL of the identity API
    pub const API_URL_VAR: &'static str = "IDENTITY_API_URL";

    /// Required: API key
    pub const API_KEY_VAR: &'static str = "IDENTITY_API_KEY";

    /// Resolve configuration from a provider.
    pub fn load(config: &dyn ConfigProvider) -> ActionResult<Self> {
        let api_url = config.get_non_empty(Self::API_URL_VAR).ok_or_else(|| {
            ActionError::Configuration(format!("{} not set", Self::API_URL_VAR))
        })?;

        let api_key = config.get_non_empty(Self::API_KEY_VAR).ok_or_else(|| {
            ActionError::Configuration(format!("{} not set", Self::API_KEY_VAR))
        })?;

        Ok(Self { api_url, api_key })
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `IDENTITY_API_URL`
    /// - `IDENTITY_API_KEY`
    pub fn from_env() -> ActionResult<Self> {
        Self::load(&EnvConfig::new())
    }

    /// Join an operation path onto the configured base URL
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_url.strip_suffix('/').unwrap_or(&self.api_url);
        format!("{base}{path}")
    }
}
