//! The `headerapikey` authentication strategy.

use std::future::ready;
use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use futures_util::future::LocalBoxFuture;

use super::config::{HeaderConfig, StrategyConfig};
use super::error::ApiKeyError;
use super::verifier::{Verified, Verifier, VerifierDropped, VerifierShapeMismatch};
use crate::http::security::config::{AuthenticateOptions, AuthenticationStrategy};
use crate::http::security::outcome::AuthOutcome;

/// Name under which the strategy registers with a host.
pub const STRATEGY_NAME: &str = "headerapikey";

/// Authenticates requests by an API key carried in a header.
///
/// The key is read from the configured header, the configured prefix is
/// stripped, and the remainder is handed to the [`Verifier`]. The verifier's
/// report becomes the [`AuthOutcome`].
///
/// Construction never fails. A verifier whose call shape disagrees with
/// `pass_request_to_verifier` is only reported when a request is
/// authenticated, as an [`AuthOutcome::Error`] carrying
/// [`VerifierShapeMismatch`].
///
/// # Example
/// ```ignore
/// use actix_apikey_core::http::security::api_key::{HeaderApiKeyStrategy, HeaderConfig, Verifier};
///
/// let strategy = HeaderApiKeyStrategy::new(
///     Some(HeaderConfig::header("Authorization").prefix("Bearer ")),
///     false,
///     Verifier::key(|api_key, done| match lookup(&api_key) {
///         Some(user) => done.success(user, None),
///         None => done.fail(None),
///     }),
/// );
/// ```
pub struct HeaderApiKeyStrategy<P, I> {
    config: Arc<StrategyConfig>,
    verifier: Verifier<P, I>,
}

impl<P, I> HeaderApiKeyStrategy<P, I> {
    /// Creates the strategy. `None` for the header configuration means
    /// `X-Api-Key` with no prefix.
    pub fn new(
        header: Option<HeaderConfig>,
        pass_request_to_verifier: bool,
        verifier: Verifier<P, I>,
    ) -> Self {
        Self {
            config: Arc::new(StrategyConfig::new(header, pass_request_to_verifier)),
            verifier,
        }
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Reads the header and strips the prefix.
    fn extract_key(&self, req: &ServiceRequest) -> Result<String, ApiKeyError> {
        let header = self.config.get_header();

        // Repeated headers are seen as one comma-joined value.
        let mut value = String::new();
        for (i, part) in req.headers().get_all(header).enumerate() {
            let part = part.to_str().map_err(|_| ApiKeyError::Malformed {
                header: header.to_string(),
            })?;
            if i > 0 {
                value.push_str(", ");
            }
            value.push_str(part);
        }

        if value.is_empty() {
            return Err(ApiKeyError::Missing);
        }

        let prefix = self.config.get_prefix();
        value
            .strip_prefix(prefix)
            .map(String::from)
            .ok_or_else(|| ApiKeyError::InvalidPrefix {
                header: header.to_string(),
                prefix: prefix.to_string(),
            })
    }
}

impl<P, I> Clone for HeaderApiKeyStrategy<P, I> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            verifier: self.verifier.clone(),
        }
    }
}

impl<P: 'static, I: 'static> AuthenticationStrategy for HeaderApiKeyStrategy<P, I> {
    type Principal = P;
    type Info = I;

    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn authenticate(
        &self,
        req: &ServiceRequest,
        _options: &AuthenticateOptions,
    ) -> LocalBoxFuture<'static, AuthOutcome<P, I>> {
        let api_key = match self.extract_key(req) {
            Ok(api_key) => api_key,
            Err(err) => return Box::pin(ready(AuthOutcome::bad_request(err))),
        };

        let passes_request = self.config.passes_request_to_verifier();
        let (done, pending) = Verified::channel();
        match (&self.verifier, passes_request) {
            (Verifier::Key(verify), false) => verify(api_key, done),
            (Verifier::KeyAndRequest(verify), true) => verify(api_key, req, done),
            (verifier, _) => {
                let mismatch = VerifierShapeMismatch {
                    passes_request,
                    takes_request: verifier.takes_request(),
                };
                return Box::pin(ready(AuthOutcome::Error(Box::new(mismatch))));
            }
        }

        Box::pin(async move {
            match pending.await {
                Ok(outcome) => outcome.resolve(),
                Err(_) => AuthOutcome::Error(Box::new(VerifierDropped)),
            }
        })
    }
}
