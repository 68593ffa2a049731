//! # Creem Checkout Sessions
//!
//! Implementation of the Creem checkout-session API.
//! This is the payment flow behind the subscription and credits tiers.

use crate::config::CreemConfig;
use act_core::{
    ActionError, ActionResult, CheckoutProvider, CheckoutRequest, ConfigProvider, EnvConfig,
    Environment, ProductType,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Deadline for one checkout-session request, measured from request start.
pub const CHECKOUT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Creem checkout provider
///
/// Issues one `POST /checkouts` per invocation and returns the hosted
/// checkout URL. Each call resolves configuration fresh, builds its own
/// payload, and races the request against [`CHECKOUT_TIMEOUT`]; concurrent
/// callers share nothing but the HTTP connection pool.
pub struct CreemCheckout {
    config_source: Arc<dyn ConfigProvider>,
    client: Client,
    timeout: Duration,
}

impl CreemCheckout {
    /// Create a new Creem checkout provider
    pub fn new(config_source: Arc<dyn ConfigProvider>) -> Self {
        // A 3xx from the provider is a rejection, never followed
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config_source,
            client,
            timeout: CHECKOUT_TIMEOUT,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(Arc::new(EnvConfig::new()))
    }

    /// Builder: override the request deadline (for testing)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the provider payload for a checkout request
    fn build_payload(config: &CreemConfig, request: &CheckoutRequest) -> CreemCheckoutPayload {
        CreemCheckoutPayload {
            product_id: request.product_id.clone(),
            customer: CreemCustomer {
                email: request.customer_email.clone(),
            },
            metadata: CreemMetadata {
                user_id: request.user_id.clone(),
                product_type: request.product_type,
                credits: request.credits(),
            },
            success_url: config.success_url.clone(),
            discount_code: request.effective_discount_code().map(String::from),
        }
    }

    /// Resolve configuration and perform the provider request.
    ///
    /// Errors returned here carry full detail; the trait impl decides how
    /// much of it leaves the process.
    async fn create_session_inner(&self, request: &CheckoutRequest) -> ActionResult<String> {
        let config = CreemConfig::load(self.config_source.as_ref())?;

        let payload = Self::build_payload(&config, request);
        let endpoint = config.checkouts_endpoint();

        debug!(
            "Creating Creem checkout session: product={}, type={}, credits={}",
            payload.product_id,
            payload.metadata.product_type.as_str(),
            payload.metadata.credits
        );

        // Race the request against the deadline. Dropping the send future
        // aborts the in-flight request, so nothing resolves late.
        let outcome = tokio::time::timeout(self.timeout, async {
            let response = self
                .client
                .post(&endpoint)
                .header("x-api-key", &config.api_key)
                .json(&payload)
                .send()
                .await
                .map_err(|e| ActionError::Network(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ActionError::Network(e.to_string()))?;

            Ok::<_, ActionError>((status, body))
        })
        .await;

        let (status, body) = match outcome {
            Err(_elapsed) => return Err(ActionError::Timeout(self.timeout.as_millis() as u64)),
            Ok(result) => result?,
        };

        if !status.is_success() {
            // Prefer the structured error body; fall back to raw text
            let detail = match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(json) => json.to_string(),
                Err(_) => body,
            };
            return Err(ActionError::ProviderRejection {
                status: status.as_u16(),
                detail,
            });
        }

        let session: CreemCheckoutResponse = serde_json::from_str(&body).map_err(|e| {
            ActionError::ContractViolation(format!("Failed to parse Creem response: {e}"))
        })?;

        session.checkout_url.ok_or_else(|| {
            ActionError::ContractViolation("API response is missing checkout_url".to_string())
        })
    }
}

#[async_trait]
impl CheckoutProvider for CreemCheckout {
    #[instrument(
        skip(self, request),
        fields(product_id = %request.product_id, product_type = request.product_type.as_str())
    )]
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> ActionResult<String> {
        // The deployment mode is resolvable even when required keys are
        // absent, so configuration failures are sanitized too.
        let environment = Environment::from_config(self.config_source.as_ref());

        match self.create_session_inner(request).await {
            Ok(checkout_url) => {
                info!("Created Creem checkout session: url={}", checkout_url);
                Ok(checkout_url)
            }
            Err(err) => {
                error!("Failed to create Creem checkout session: {}", err);

                if environment.is_production() {
                    Err(ActionError::CheckoutUnavailable)
                } else {
                    Err(err)
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "creem"
    }
}

// =============================================================================
// Creem API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreemCheckoutPayload {
    product_id: String,
    customer: CreemCustomer,
    metadata: CreemMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreemCustomer {
    email: String,
}

#[derive(Debug, Serialize)]
struct CreemMetadata {
    user_id: String,
    product_type: ProductType,
    credits: u32,
}

#[derive(Debug, Deserialize)]
struct CreemCheckoutResponse {
    #[serde(default)]
    checkout_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::StaticConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn subscription_request() -> CheckoutRequest {
        CheckoutRequest::new(
            "prod_2RoOqhbvjLX9C3jw18M0zN",
            "user@example.com",
            "user-42",
            ProductType::Subscription,
        )
    }

    fn config_for(server: &MockServer) -> StaticConfig {
        StaticConfig::new()
            .with("CREEM_API_URL", server.uri())
            .with("CREEM_API_KEY", "creem_sk_test")
    }

    fn checkout_with(config: StaticConfig) -> CreemCheckout {
        CreemCheckout::new(Arc::new(config))
    }

    #[test]
    fn test_payload_credits_default_to_zero() {
        let config = CreemConfig {
            api_url: "https://api.creem.io".to_string(),
            api_key: "creem_sk_test".to_string(),
            success_url: None,
            environment: Environment::Development,
        };

        let payload = CreemCheckout::build_payload(&config, &subscription_request());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["metadata"]["credits"], 0);
        assert_eq!(json["metadata"]["user_id"], "user-42");
        assert_eq!(json["metadata"]["product_type"], "subscription");
        assert_eq!(json["customer"]["email"], "user@example.com");

        let with_credits = CreemCheckout::build_payload(
            &config,
            &CheckoutRequest::new("prod_c", "user@example.com", "user-42", ProductType::Credits)
                .with_credits(6),
        );
        let json = serde_json::to_value(&with_credits).unwrap();
        assert_eq!(json["metadata"]["credits"], 6);
        assert_eq!(json["metadata"]["product_type"], "credits");
    }

    #[test]
    fn test_payload_omits_empty_optional_fields() {
        let config = CreemConfig {
            api_url: "https://api.creem.io".to_string(),
            api_key: "creem_sk_test".to_string(),
            success_url: None,
            environment: Environment::Development,
        };

        let payload = CreemCheckout::build_payload(&config, &subscription_request());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("success_url").is_none());
        assert!(json.get("discount_code").is_none());

        // Empty discount codes are never sent
        let payload = CreemCheckout::build_payload(
            &config,
            &subscription_request().with_discount_code(""),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("discount_code").is_none());
    }

    #[test]
    fn test_payload_attaches_configured_optional_fields() {
        let config = CreemConfig {
            api_url: "https://api.creem.io".to_string(),
            api_key: "creem_sk_test".to_string(),
            success_url: Some("https://app.example.com/billing/success".to_string()),
            environment: Environment::Development,
        };

        let payload = CreemCheckout::build_payload(
            &config,
            &subscription_request().with_discount_code("0520"),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["success_url"], "https://app.example.com/billing/success");
        assert_eq!(json["discount_code"], "0520");
    }

    #[tokio::test]
    async fn test_create_checkout_session_returns_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .and(header("x-api-key", "creem_sk_test"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "product_id": "prod_2RoOqhbvjLX9C3jw18M0zN",
                "customer": { "email": "user@example.com" },
                "metadata": {
                    "user_id": "user-42",
                    "product_type": "subscription",
                    "credits": 0,
                },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "checkout_url": "https://pay.example/abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let checkout = checkout_with(config_for(&server));
        let url = checkout
            .create_checkout_session(&subscription_request())
            .await
            .unwrap();

        assert_eq!(url, "https://pay.example/abc");
    }

    #[tokio::test]
    async fn test_trailing_slash_base_url_hits_single_slash_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "checkout_url": "https://pay.example/abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = StaticConfig::new()
            .with("CREEM_API_URL", format!("{}/", server.uri()))
            .with("CREEM_API_KEY", "creem_sk_test");

        let checkout = checkout_with(config);
        let url = checkout
            .create_checkout_session(&subscription_request())
            .await
            .unwrap();

        assert_eq!(url, "https://pay.example/abc");
    }

    #[tokio::test]
    async fn test_missing_config_fails_before_any_network_call() {
        let server = MockServer::start().await;

        let no_key = StaticConfig::new().with("CREEM_API_URL", server.uri());
        let err = checkout_with(no_key)
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Configuration(_)));

        let no_url = StaticConfig::new().with("CREEM_API_KEY", "creem_sk_test");
        let err = checkout_with(no_url)
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Configuration(_)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "invalid product"})),
            )
            .mount(&server)
            .await;

        let err = checkout_with(config_for(&server))
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        match err {
            ActionError::ProviderRejection { status, detail } => {
                assert_eq!(status, 400);
                assert!(detail.contains("invalid product"));
            }
            other => panic!("expected ProviderRejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_redirect_status_is_provider_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "https://elsewhere.example/"),
            )
            .mount(&server)
            .await;

        let err = checkout_with(config_for(&server))
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ActionError::ProviderRejection { status: 302, .. }
        ));
    }

    #[tokio::test]
    async fn test_non_json_error_body_falls_back_to_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = checkout_with(config_for(&server))
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        match err {
            ActionError::ProviderRejection { status, detail } => {
                assert_eq!(status, 503);
                assert_eq!(detail, "upstream unavailable");
            }
            other => panic!("expected ProviderRejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_without_checkout_url_is_contract_violation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_123"})))
            .mount(&server)
            .await;

        let err = checkout_with(config_for(&server))
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::ContractViolation(_)));
        assert!(err.to_string().contains("checkout_url"));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"checkout_url": "https://pay.example/late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let checkout =
            checkout_with(config_for(&server)).with_timeout(Duration::from_millis(50));
        let err = checkout
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Timeout(50)));
    }

    #[tokio::test]
    async fn test_production_mode_hides_provider_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "secret-detail"})),
            )
            .mount(&server)
            .await;

        let config = config_for(&server).with("ENVIRONMENT", "production");
        let err = checkout_with(config)
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::CheckoutUnavailable));
        assert!(!err.to_string().contains("secret-detail"));
        assert_eq!(
            err.to_string(),
            "Failed to create checkout session. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_development_mode_preserves_provider_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "secret-detail"})),
            )
            .mount(&server)
            .await;

        let err = checkout_with(config_for(&server))
            .create_checkout_session(&subscription_request())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("secret-detail"));
    }
}
