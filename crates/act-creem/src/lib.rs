//! # act-creem
//!
//! Creem checkout provider for the launchkit action layer.
//!
//! Creem hosts the payment page; this crate only requests a checkout
//! session and hands back the redirect URL. One outbound request per
//! invocation, a fixed 10 s deadline, no retries.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use act_creem::CreemCheckout;
//! use act_core::{CheckoutProvider, CheckoutRequest, ProductType};
//!
//! // Create provider from environment (CREEM_API_URL, CREEM_API_KEY)
//! let creem = CreemCheckout::from_env();
//!
//! let request = CheckoutRequest::new(
//!     "prod_2RoOqhbvjLX9C3jw18M0zN",
//!     "user@example.com",
//!     "user-42",
//!     ProductType::Subscription,
//! );
//!
//! // Redirect the user to the returned URL
//! let checkout_url = creem.create_checkout_session(&request).await?;
//! ```
//!
//! ## Error exposure
//!
//! Every failure is logged in full at the point of detection. What the
//! caller sees depends on the deployment mode: production collapses all
//! failure kinds into one generic message, everything else propagates the
//! original error (including provider response bodies) unchanged.

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{CreemCheckout, CHECKOUT_TIMEOUT};
pub use config::CreemConfig;
