//! Core trait for authentication strategies.

use std::collections::HashMap;

use actix_web::dev::ServiceRequest;
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

use crate::http::security::outcome::AuthOutcome;

/// A way of authenticating a request.
///
/// `authenticate` reads what it needs from the request synchronously and
/// returns a future resolving to exactly one [`AuthOutcome`]. Hosts decide
/// what each outcome means for the rest of the request pipeline.
pub trait AuthenticationStrategy {
    /// Identity produced on success.
    type Principal: 'static;
    /// Auxiliary data: metadata on success, rejection detail on failure.
    type Info: 'static;

    /// Name the strategy is registered under.
    fn name(&self) -> &str;

    /// Attempts to authenticate the request.
    fn authenticate(
        &self,
        req: &ServiceRequest,
        options: &AuthenticateOptions,
    ) -> LocalBoxFuture<'static, AuthOutcome<Self::Principal, Self::Info>>;
}

/// Per-call options handed through to a strategy.
///
/// The header API key strategy does not read any of them; they exist so hosts
/// can pass settings to strategies that do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticateOptions {
    values: HashMap<String, Value>,
}

impl AuthenticateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns an option by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}
