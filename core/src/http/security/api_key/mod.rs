//! Header API Key authentication.
//!
//! # Overview
//!
//! The `headerapikey` strategy reads an API key from one request header,
//! strips a fixed prefix and asks a caller-supplied [`Verifier`] whether the
//! key is good. It never stores, issues or rotates keys.
//!
//! ```text
//! request ─▶ read header ─▶ check prefix ─▶ verifier ─▶ Success | Fail | Error
//!                 │              │
//!                 └── Missing ───┴── InvalidPrefix ──▶ Fail (400)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use actix_apikey_core::http::security::api_key::{HeaderApiKeyStrategy, HeaderConfig, Verifier};
//! use actix_apikey_core::http::security::middleware::ApiKeyAuthentication;
//!
//! let strategy = HeaderApiKeyStrategy::new(
//!     Some(HeaderConfig::header("Authorization").prefix("Bearer ")),
//!     false,
//!     Verifier::key(|api_key, done| {
//!         if api_key == "sk_live_abc123" {
//!             done.success(json!({"id": "svc-billing"}), None);
//!         } else {
//!             done.fail(Some(json!({"reason": "unknown key"})));
//!         }
//!     }),
//! );
//!
//! App::new()
//!     .wrap(ApiKeyAuthentication::new(strategy))
//!     .service(my_api_endpoint)
//! ```
//!
//! # Key Location
//!
//! | Configuration | Expected request header |
//! |---------------|-------------------------|
//! | default | `X-Api-Key: sk_live_abc123` |
//! | `HeaderConfig::header("Authorization").prefix("Bearer ")` | `Authorization: Bearer sk_live_abc123` |
//!
//! Header names match case-insensitively; prefixes match exactly.

mod config;
mod error;
mod strategy;
mod verifier;

pub use config::{HeaderConfig, StrategyConfig, DEFAULT_HEADER};
pub use error::ApiKeyError;
pub use strategy::{HeaderApiKeyStrategy, STRATEGY_NAME};
pub use verifier::{
    VerificationOutcome, Verified, Verifier, VerifierDropped, VerifierShapeMismatch,
};
