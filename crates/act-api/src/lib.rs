//! # act-api
//!
//! HTTP action surface for the launchkit action layer.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Auth form actions answering with encoded redirects
//! - Checkout-session endpoint answering with JSON
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/auth/sign-up` | Register + confirmation email |
//! | POST | `/auth/sign-in` | Password sign-in |
//! | POST | `/auth/sign-out` | Sign out |
//! | POST | `/auth/forgot-password` | Send password-reset email |
//! | POST | `/auth/reset-password` | Update password |
//! | POST | `/api/v1/checkout` | Create checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
