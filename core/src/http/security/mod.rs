//! Security module providing request authentication.
//!
//! # Module Structure
//!
//! - `config` - Core trait (AuthenticationStrategy) and per-call options
//! - `outcome` - The three terminal outcomes and the callback-style handler trait
//! - `api_key` - Header API key strategy (HeaderApiKeyStrategy)
//! - `extractor` - Actix Web extractors (Authenticated, AuthInfo)
//! - `middleware` - Authentication middleware (ApiKeyAuthentication)

// Re-exports for convenience
pub use api_key::{ApiKeyError, HeaderApiKeyStrategy, HeaderConfig, Verified, Verifier};
pub use config::{AuthenticateOptions, AuthenticationStrategy};
pub use extractor::{AuthInfo, Authenticated};
pub use middleware::ApiKeyAuthentication;
pub use outcome::{AuthOutcome, FailReason, OutcomeHandler, VerifyError};

// Internal modules (private implementation details)
mod config;
mod extractor;

// Public modules
pub mod api_key;
pub mod middleware;
pub mod outcome;
