//! # Launchkit Actions
//!
//! Server-side action layer for the launchkit SaaS front end.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export CREEM_API_URL=https://api.creem.io
//! export CREEM_API_KEY=creem_sk_...
//! export IDENTITY_API_URL=https://auth.example.com/auth/v1
//! export IDENTITY_API_KEY=anon_...
//!
//! # Run the server
//! launchkit
//! ```

use act_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Identity provider: {}", state.identity.provider_name());
    info!("Checkout provider: {}", state.checkout.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Launchkit actions starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 Checkout: POST http://{}/api/v1/checkout", addr);
        info!("🔐 Auth: POST http://{}/auth/sign-in", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
