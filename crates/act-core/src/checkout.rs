//! # Checkout Types
//!
//! Request types and the provider trait for checkout-session creation.

use crate::error::ActionResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What kind of offering a checkout pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Recurring subscription
    Subscription,
    /// One-time credits purchase
    Credits,
}

impl ProductType {
    /// Wire representation used in provider metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Subscription => "subscription",
            ProductType::Credits => "credits",
        }
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Subscription
    }
}

/// A request to create a hosted checkout session.
///
/// Transient per-invocation value; nothing here is persisted or shared
/// across calls.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Provider product ID identifying the priced offering
    pub product_id: String,

    /// Customer email, prefilled on the hosted page
    pub customer_email: String,

    /// Our user ID, carried in provider metadata
    pub user_id: String,

    /// Offering kind, carried in provider metadata
    pub product_type: ProductType,

    /// Credits purchased (credits products only; absent means 0)
    pub credits_amount: Option<u32>,

    /// Optional discount code; empty strings are never sent
    pub discount_code: Option<String>,
}

impl CheckoutRequest {
    /// Create a new checkout request
    pub fn new(
        product_id: impl Into<String>,
        customer_email: impl Into<String>,
        user_id: impl Into<String>,
        product_type: ProductType,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            customer_email: customer_email.into(),
            user_id: user_id.into(),
            product_type,
            credits_amount: None,
            discount_code: None,
        }
    }

    /// Set the credits amount
    pub fn with_credits(mut self, amount: u32) -> Self {
        self.credits_amount = Some(amount);
        self
    }

    /// Set a discount code
    pub fn with_discount_code(mut self, code: impl Into<String>) -> Self {
        self.discount_code = Some(code.into());
        self
    }

    /// Credits value carried in provider metadata (absent means 0)
    pub fn credits(&self) -> u32 {
        self.credits_amount.unwrap_or(0)
    }

    /// Discount code to send, if any; empty strings count as absent
    pub fn effective_discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Core trait for checkout providers.
///
/// Each payment provider implements this trait, allowing the action layer
/// to switch providers via configuration.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL.
    ///
    /// A returned error is the only failure signal; implementations never
    /// return a partial or default URL.
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> ActionResult<String>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed checkout provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_default_to_zero() {
        let request = CheckoutRequest::new(
            "prod_123",
            "user@example.com",
            "user-1",
            ProductType::Credits,
        );
        assert_eq!(request.credits(), 0);

        let request = request.with_credits(6);
        assert_eq!(request.credits(), 6);
    }

    #[test]
    fn test_empty_discount_code_is_absent() {
        let request = CheckoutRequest::new(
            "prod_123",
            "user@example.com",
            "user-1",
            ProductType::Subscription,
        );
        assert!(request.effective_discount_code().is_none());

        let request = request.with_discount_code("");
        assert!(request.effective_discount_code().is_none());

        let request = request.with_discount_code("0520");
        assert_eq!(request.effective_discount_code(), Some("0520"));
    }

    #[test]
    fn test_product_type_wire_format() {
        assert_eq!(ProductType::Subscription.as_str(), "subscription");
        assert_eq!(ProductType::Credits.as_str(), "credits");

        let json = serde_json::to_string(&ProductType::Credits).unwrap();
        assert_eq!(json, "\"credits\"");
    }
}
