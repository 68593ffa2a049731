//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the identity and checkout providers and server configuration.

use act_core::{
    BoxedCheckoutProvider, BoxedIdentityProvider, ConfigProvider, EnvConfig, Environment,
};
use act_creem::CreemCheckout;
use act_identity::HttpIdentityProvider;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public origin of the front end, used for auth callback URLs
    pub base_url: String,
    /// Deployment mode
    pub environment: Environment,
}

impl AppConfig {
    /// Resolve from a config provider
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self {
            host: config
                .get("HOST")
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: config
                .get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: config
                .get_non_empty("BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: Environment::from_config(config),
        }
    }

    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_config(&EnvConfig::new())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Auth callback URL on the front-end origin
    pub fn auth_callback_url(&self) -> String {
        format!("{}/auth/callback", self.base_url)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Identity provider the auth actions pass through to
    pub identity: BoxedIdentityProvider,
    /// Checkout provider
    pub checkout: BoxedCheckoutProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState wired to the real providers
    pub fn new() -> anyhow::Result<Self> {
        let env: Arc<EnvConfig> = Arc::new(EnvConfig::new());
        let config = AppConfig::from_config(env.as_ref());

        let identity = HttpIdentityProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize identity provider: {e}"))?;

        // Creem resolves its own configuration per invocation; a missing
        // key surfaces on the first checkout, not at startup.
        let checkout = CreemCheckout::new(env);

        Ok(Self {
            identity: Arc::new(identity),
            checkout: Arc::new(checkout),
            config,
        })
    }

    /// Create an AppState with explicit providers (for testing)
    pub fn with_providers(
        identity: BoxedIdentityProvider,
        checkout: BoxedCheckoutProvider,
        config: AppConfig,
    ) -> Self {
        Self {
            identity,
            checkout,
            config,
        }
    }
}
