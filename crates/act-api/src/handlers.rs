//! # Request Handlers
//!
//! Axum handlers for the auth and checkout actions. Auth actions answer
//! with encoded redirects (status tag + message in the query string);
//! checkout answers with JSON.

use crate::state::AppState;
use act_core::{
    ActionError, ActionRedirect, CheckoutRequest, Credentials, ProductType,
};
use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Sign-up form action input
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-in form action input
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Forgot-password form action input
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
    /// Where to send the user after the reset email is queued
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Reset-password form action input
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Create checkout request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Provider product ID of the chosen tier
    pub product_id: String,
    /// Customer email
    pub email: String,
    /// Our user ID
    pub user_id: String,
    /// Offering kind
    pub product_type: ProductType,
    /// Credits purchased (credits products only)
    #[serde(default)]
    pub credits_amount: Option<u32>,
    /// Optional discount code
    #[serde(default)]
    pub discount_code: Option<String>,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Hosted checkout URL (redirect user here)
    pub checkout_url: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn action_error_to_response(err: ActionError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Render an action redirect as an HTTP redirect
fn encoded_redirect(action: ActionRedirect) -> Redirect {
    Redirect::to(&action.location())
}

/// Message shown to the user for a failed auth pass-through
fn surface_message(err: &ActionError) -> String {
    match err {
        ActionError::Identity(message) => message.clone(),
        other => other.to_string(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "launchkit",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Register a new user and send the confirmation email
#[instrument(skip_all)]
pub async fn sign_up(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> Redirect {
    if form.email.is_empty() || form.password.is_empty() {
        return encoded_redirect(ActionRedirect::error(
            "/sign-up",
            "Email and password are required",
        ));
    }

    let credentials = Credentials::new(form.email, form.password);
    let callback = state.config.auth_callback_url();

    match state.identity.sign_up(&credentials, Some(&callback)).await {
        Err(err) => {
            error!("Sign-up failed: {}", err);
            encoded_redirect(ActionRedirect::error("/sign-up", surface_message(&err)))
        }
        Ok(()) => encoded_redirect(ActionRedirect::success(
            "/dashboard",
            "Thanks for signing up!",
        )),
    }
}

/// Sign in with email and password
#[instrument(skip_all)]
pub async fn sign_in(State(state): State<AppState>, Form(form): Form<SignInForm>) -> Redirect {
    let credentials = Credentials::new(form.email, form.password);

    match state.identity.sign_in_with_password(&credentials).await {
        Err(err) => {
            warn!("Sign-in rejected: {}", err);
            encoded_redirect(ActionRedirect::error("/sign-in", surface_message(&err)))
        }
        // Session propagation happens on the auth callback route; the
        // action itself only reports the outcome.
        Ok(_session) => Redirect::to("/dashboard"),
    }
}

/// Send a password-reset email
#[instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Redirect {
    if form.email.is_empty() {
        return encoded_redirect(ActionRedirect::error(
            "/forgot-password",
            "Email is required",
        ));
    }

    let redirect_to = format!(
        "{}?redirect_to=/dashboard/reset-password",
        state.config.auth_callback_url()
    );

    if let Err(err) = state
        .identity
        .send_password_reset(&form.email, Some(&redirect_to))
        .await
    {
        error!("Password reset failed: {}", err);
        return encoded_redirect(ActionRedirect::error(
            "/forgot-password",
            "Could not reset password",
        ));
    }

    match form.callback_url.filter(|url| !url.is_empty()) {
        Some(callback_url) => Redirect::to(&callback_url),
        None => encoded_redirect(ActionRedirect::success(
            "/forgot-password",
            "Check your email for a link to reset your password.",
        )),
    }
}

/// Update the signed-in user's password.
///
/// Each failure halts the action with its own redirect.
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ResetPasswordForm>,
) -> Redirect {
    if form.password.is_empty() || form.confirm_password.is_empty() {
        return encoded_redirect(ActionRedirect::error(
            "/dashboard/reset-password",
            "Password and confirm password are required",
        ));
    }

    if form.password != form.confirm_password {
        return encoded_redirect(ActionRedirect::error(
            "/dashboard/reset-password",
            "Passwords do not match",
        ));
    }

    let Some(token) = bearer_token(&headers) else {
        return encoded_redirect(ActionRedirect::error(
            "/dashboard/reset-password",
            "Not signed in",
        ));
    };

    if let Err(err) = state.identity.update_password(token, &form.password).await {
        error!("Password update failed: {}", err);
        return encoded_redirect(ActionRedirect::error(
            "/dashboard/reset-password",
            "Password update failed",
        ));
    }

    encoded_redirect(ActionRedirect::success(
        "/dashboard/reset-password",
        "Password updated",
    ))
}

/// Sign out and return to the sign-in page
#[instrument(skip_all)]
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if let Some(token) = bearer_token(&headers) {
        // The redirect happens regardless; a failed revocation only means
        // the token ages out server-side.
        if let Err(err) = state.identity.sign_out(token).await {
            warn!("Sign-out failed: {}", err);
        }
    }

    Redirect::to("/sign-in")
}

/// Create a checkout session for the chosen tier
#[instrument(
    skip(state, request),
    fields(
        action_id = %uuid::Uuid::new_v4(),
        product_id = %request.product_id,
        product_type = request.product_type.as_str(),
    )
)]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.product_id.is_empty() {
        return Err(action_error_to_response(ActionError::InvalidRequest(
            "product_id must not be empty".to_string(),
        )));
    }

    let mut checkout_request = CheckoutRequest::new(
        request.product_id,
        request.email,
        request.user_id,
        request.product_type,
    );

    if let Some(credits) = request.credits_amount {
        checkout_request = checkout_request.with_credits(credits);
    }

    if let Some(code) = request.discount_code {
        checkout_request = checkout_request.with_discount_code(code);
    }

    let checkout_url = state
        .checkout
        .create_checkout_session(&checkout_request)
        .await
        .map_err(action_error_to_response)?;

    info!("Created checkout session");

    Ok(Json(CreateCheckoutResponse { checkout_url }))
}
