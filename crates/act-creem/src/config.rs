//! # Creem Configuration
//!
//! Configuration for the Creem payment API. All values are resolved
//! through the `ConfigProvider` capability, once per checkout invocation.

use act_core::{ActionError, ActionResult, ConfigProvider, EnvConfig, Environment};

/// Creem API configuration
#[derive(Debug, Clone)]
pub struct CreemConfig {
    /// Base API URL (e.g. `https://api.creem.io`)
    pub api_url: String,

    /// Secret API key sent in the `x-api-key` header
    pub api_key: String,

    /// Redirect URL attached to checkouts after successful payment
    pub success_url: Option<String>,

    /// Deployment mode, gates error-detail exposure
    pub environment: Environment,
}

impl CreemConfig {
    /// Required: base URL of the Creem API
    pub const API_URL_VAR: &'static str = "CREEM_API_URL";

    /// Required: secret API key
    pub const API_KEY_VAR: &'static str = "CREEM_API_KEY";

    /// Optional: success redirect URL
    pub const SUCCESS_URL_VAR: &'static str = "CREEM_SUCCESS_URL";

    /// Resolve configuration from a provider.
    ///
    /// Absence of a required value is a configuration error for this
    /// invocation only; nothing is cached across calls.
    pub fn load(config: &dyn ConfigProvider) -> ActionResult<Self> {
        let api_url = config.get_non_empty(Self::API_URL_VAR).ok_or_else(|| {
            ActionError::Configuration(format!("{} not set", Self::API_URL_VAR))
        })?;

        let api_key = config.get_non_empty(Self::API_KEY_VAR).ok_or_else(|| {
            ActionError::Configuration(format!("{} not set", Self::API_KEY_VAR))
        })?;

        Ok(Self {
            api_url,
            api_key,
            success_url: config.get_non_empty(Self::SUCCESS_URL_VAR),
            environment: Environment::from_config(config),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CREEM_API_URL`
    /// - `CREEM_API_KEY`
    pub fn from_env() -> ActionResult<Self> {
        Self::load(&EnvConfig::new())
    }

    /// Endpoint for checkout-session creation.
    ///
    /// Strips exactly one trailing slash from the configured base URL
    /// before appending the fixed `/checkouts` path.
    pub fn checkouts_endpoint(&self) -> String {
        let base = self.api_url.strip_suffix('/').unwrap_or(&self.api_url);
        format!("{base}/checkouts")
    }
}
