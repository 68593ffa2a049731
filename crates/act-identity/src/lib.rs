//! # act-identity
//!
//! HTTP identity-provider client for the launchkit action layer.
//!
//! A thin pass-through to a GoTrue-style identity API: sign-up, password
//! sign-in, password-reset email, password update, sign-out. The provider
//! itself is an external collaborator; this crate only speaks its wire
//! protocol and maps rejections to `ActionError::Identity` messages the
//! auth actions can surface.
//!
//! ```rust,ignore
//! use act_identity::HttpIdentityProvider;
//! use act_core::{Credentials, IdentityProvider};
//!
//! let identity = HttpIdentityProvider::from_env()?;
//! identity
//!     .sign_up(&Credentials::new(email, password), Some(&callback_url))
//!     .await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::HttpIdentityProvider;
pub use config::IdentityConfig;
