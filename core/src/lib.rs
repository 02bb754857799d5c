//! # Actix API Key Core
//!
//! Header API key authentication for Actix Web.
//!
//! The crate is split in two layers:
//! - [`http::security::api_key`] - the `headerapikey` strategy itself: read a header,
//!   check its prefix, hand the key to a caller-supplied verifier and map the result
//!   to one of three outcomes.
//! - [`http::security::middleware`] / [`http::security::extractor`] - the Actix Web
//!   binding that turns those outcomes into responses and request extensions.

pub mod http;
