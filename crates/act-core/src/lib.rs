//! # act-core
//!
//! Core types and traits for the launchkit action layer.
//!
//! This crate provides:
//! - `CheckoutProvider` trait and `CheckoutRequest` for checkout-session creation
//! - `IdentityProvider` trait for the external auth collaborator
//! - `ConfigProvider` capability and the `Environment` deployment mode
//! - `ActionRedirect` for surfacing action outcomes to the front end
//! - `ActionError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use act_core::{CheckoutProvider, CheckoutRequest, ProductType};
//!
//! // Build a request from the signed-in user and the chosen tier
//! let request = CheckoutRequest::new(tier.product_id, user.email, user.id, ProductType::Subscription)
//!     .with_discount_code("0520");
//!
//! // Ask the configured provider for a hosted checkout URL
//! let checkout_url = provider.create_checkout_session(&request).await?;
//!
//! // Redirect user to checkout_url
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod identity;
pub mod response;

// Re-exports for convenience
pub use checkout::{BoxedCheckoutProvider, CheckoutProvider, CheckoutRequest, ProductType};
pub use config::{ConfigProvider, EnvConfig, Environment, StaticConfig};
pub use error::{ActionError, ActionResult};
pub use identity::{AuthSession, BoxedIdentityProvider, Credentials, IdentityProvider};
pub use response::{ActionRedirect, ActionStatus};
