//! # Configuration Capability
//!
//! Actions read process-wide configuration (API URLs, secrets, deployment
//! mode) through the `ConfigProvider` trait rather than touching
//! `std::env` directly, so tests can substitute deterministic values.

use std::collections::HashMap;

/// Read-only source of named configuration values.
///
/// Implementations return `None` for absent keys; callers decide whether
/// absence is fatal.
pub trait ConfigProvider: Send + Sync {
    /// Look up a configuration value by name.
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a value, treating empty strings as absent.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

/// Configuration backed by process environment variables.
///
/// Loads `.env` on construction if present, like the rest of the stack.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory configuration for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a configuration value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Deployment mode, read from the `ENVIRONMENT` variable.
///
/// Used only to gate how much error detail leaves the process; production
/// callers get a generic message, everyone else gets the original error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable the mode is read from
    pub const VAR: &'static str = "ENVIRONMENT";

    /// Resolve the deployment mode from a config provider.
    ///
    /// Unknown or missing values fall back to `Development`; production
    /// must be named explicitly.
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        match config.get(Self::VAR).as_deref() {
            Some("production") => Environment::Production,
            Some("staging") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
