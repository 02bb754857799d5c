//! Authentication middleware for Actix Web.
//!
//! Binds an [`AuthenticationStrategy`] to the request pipeline:
//!
//! | Outcome | Response |
//! |---------|----------|
//! | Success | principal and info stored in extensions, request forwarded |
//! | Fail, bad request | `400` with a JSON diagnostic |
//! | Fail, rejected | `401` (or the outcome's status hint) with `WWW-Authenticate: ApiKey realm="..."` |
//! | Error | `500`, cause logged |

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use tracing::{debug, error};

use crate::http::error::AuthError;
use crate::http::security::config::{AuthenticateOptions, AuthenticationStrategy};
use crate::http::security::extractor::{AuthInfo, Authenticated};
use crate::http::security::outcome::{AuthOutcome, FailReason};

/// Authentication middleware factory.
///
/// # Example
/// ```ignore
/// App::new().wrap(
///     ApiKeyAuthentication::new(strategy)
///         .realm("Billing API")
/// )
/// ```
pub struct ApiKeyAuthentication<St> {
    strategy: St,
    options: AuthenticateOptions,
    realm: String,
}

impl<St> ApiKeyAuthentication<St> {
    pub fn new(strategy: St) -> Self {
        ApiKeyAuthentication {
            strategy,
            options: AuthenticateOptions::default(),
            realm: "API".to_string(),
        }
    }

    /// Options handed to the strategy on every request.
    pub fn options(mut self, options: AuthenticateOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the realm announced in the `WWW-Authenticate` challenge.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }
}

impl<S, B, St> Transform<S, ServiceRequest> for ApiKeyAuthentication<St>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: AuthenticationStrategy + Clone + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyAuthenticationService<St, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyAuthenticationService {
            name: Rc::from(self.strategy.name()),
            strategy: self.strategy.clone(),
            options: self.options.clone(),
            challenge: Rc::from(format!("ApiKey realm=\"{}\"", self.realm)),
            service: Rc::new(service),
        })
    }
}

/// Authentication middleware service.
pub struct ApiKeyAuthenticationService<St, S> {
    name: Rc<str>,
    strategy: St,
    options: AuthenticateOptions,
    challenge: Rc<str>,
    service: Rc<S>,
}

impl<St, S, B> Service<ServiceRequest> for ApiKeyAuthenticationService<St, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: AuthenticationStrategy,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let name = Rc::clone(&self.name);
        let challenge = Rc::clone(&self.challenge);

        // The strategy reads the request now; only the verdict is awaited.
        let pending = self.strategy.authenticate(&req, &self.options);

        Box::pin(async move {
            match pending.await {
                AuthOutcome::Success { principal, info } => {
                    req.extensions_mut().insert(Authenticated::new(principal));
                    req.extensions_mut().insert(AuthInfo::new(info));

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AuthOutcome::Fail { reason, status } => {
                    let response = match reason {
                        // Client input errors always answer 400.
                        FailReason::BadRequest(err) => {
                            debug!(strategy = %name, reason = %err, "bad authentication request");
                            err.error_response()
                        }
                        FailReason::Rejected(_) => {
                            let status = status.unwrap_or(StatusCode::UNAUTHORIZED);
                            debug!(strategy = %name, %status, "credential rejected");
                            HttpResponse::build(status)
                                .insert_header((WWW_AUTHENTICATE, &*challenge))
                                .json(serde_json::json!({
                                    "error": "Unauthorized",
                                    "message": "Invalid API Key",
                                }))
                        }
                    };
                    Ok(req.into_response(response).map_into_right_body())
                }
                AuthOutcome::Error(err) => {
                    error!(strategy = %name, error = %err, "credential verification failed");
                    Err(AuthError::Unavailable.into())
                }
            }
        })
    }
}
