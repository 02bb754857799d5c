//! Extractors for accessing the authenticated principal in handlers.
//!
//! [`ApiKeyAuthentication`](crate::http::security::middleware::ApiKeyAuthentication)
//! stores the principal and info of a successful attempt in the request
//! extensions; these extractors read them back.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;

/// Extractor for the authenticated principal.
///
/// # Usage
/// ```ignore
/// use actix_apikey_core::http::security::Authenticated;
///
/// async fn handler(client: Authenticated<ApiClient>) -> impl Responder {
///     format!("Hello, {}!", client.name)
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` if the request was not authenticated.
#[derive(Debug, Clone)]
pub struct Authenticated<P>(P);

impl<P> Authenticated<P> {
    /// Creates a new wrapper.
    pub fn new(principal: P) -> Self {
        Authenticated(principal)
    }

    /// Returns the inner principal.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> Deref for Authenticated<P> {
    type Target = P;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: Clone + 'static> FromRequest for Authenticated<P> {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Authenticated<P>>().cloned() {
            Some(principal) => ready(Ok(principal)),
            None => ready(Err(AuthError::Unauthorized)),
        }
    }
}

/// Extractor for the auxiliary info the verifier attached to a success.
///
/// Never fails: yields `None` when there is no info or no authentication.
#[derive(Debug, Clone)]
pub struct AuthInfo<I>(Option<I>);

impl<I> AuthInfo<I> {
    pub fn new(info: Option<I>) -> Self {
        AuthInfo(info)
    }

    /// Returns the inner Option<I>.
    pub fn into_inner(self) -> Option<I> {
        self.0
    }
}

impl<I> Deref for AuthInfo<I> {
    type Target = Option<I>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<I: Clone + 'static> FromRequest for AuthInfo<I> {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let info = req
            .extensions()
            .get::<AuthInfo<I>>()
            .cloned()
            .unwrap_or(AuthInfo(None));
        ready(Ok(info))
    }
}
