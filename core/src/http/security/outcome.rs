//! Terminal outcomes of an authentication attempt.
//!
//! Every attempt ends in exactly one of three states:
//! - **Success** - a principal was resolved, with optional auxiliary info.
//! - **Fail** - the client is not authenticated. Either the request itself was
//!   unusable ([`FailReason::BadRequest`]) or the verifier rejected the
//!   credential ([`FailReason::Rejected`]).
//! - **Error** - the verifier could not decide (backend down, bug, ...). The
//!   error is carried unchanged.

use actix_web::http::StatusCode;

use crate::http::security::api_key::ApiKeyError;

/// Error reported by a verifier, propagated without inspection.
pub type VerifyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why an attempt failed.
#[derive(Debug)]
pub enum FailReason<I> {
    /// The request did not carry a usable credential.
    BadRequest(ApiKeyError),
    /// The verifier rejected the credential; the detail is whatever it supplied.
    Rejected(Option<I>),
}

impl<I> FailReason<I> {
    /// Returns the strategy diagnostic, if the failure came from client input.
    pub fn bad_request(&self) -> Option<&ApiKeyError> {
        match self {
            FailReason::BadRequest(err) => Some(err),
            FailReason::Rejected(_) => None,
        }
    }

    /// Returns the verifier's rejection detail, if any.
    pub fn rejection(&self) -> Option<&I> {
        match self {
            FailReason::Rejected(info) => info.as_ref(),
            FailReason::BadRequest(_) => None,
        }
    }
}

/// The single terminal result of [`AuthenticationStrategy::authenticate`].
///
/// [`AuthenticationStrategy::authenticate`]: crate::http::security::AuthenticationStrategy::authenticate
#[derive(Debug)]
pub enum AuthOutcome<P, I> {
    Success {
        principal: P,
        info: Option<I>,
    },
    Fail {
        reason: FailReason<I>,
        /// Status the host should answer with; `None` leaves it to the host.
        status: Option<StatusCode>,
    },
    Error(VerifyError),
}

impl<P, I> AuthOutcome<P, I> {
    pub(crate) fn bad_request(err: ApiKeyError) -> Self {
        AuthOutcome::Fail {
            reason: FailReason::BadRequest(err),
            status: None,
        }
    }

    pub(crate) fn rejected(info: Option<I>) -> Self {
        AuthOutcome::Fail {
            reason: FailReason::Rejected(info),
            status: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, AuthOutcome::Fail { .. })
    }

    /// True when verification itself broke down, as opposed to a rejection.
    pub fn is_error(&self) -> bool {
        matches!(self, AuthOutcome::Error(_))
    }

    /// Signals this outcome to a callback-style host.
    ///
    /// Exactly one handler method is called, exactly once.
    pub fn dispatch<H>(self, handler: &mut H)
    where
        H: OutcomeHandler<P, I> + ?Sized,
    {
        match self {
            AuthOutcome::Success { principal, info } => handler.success(principal, info),
            AuthOutcome::Fail { reason, status } => handler.fail(reason, status),
            AuthOutcome::Error(err) => handler.error(err),
        }
    }
}

/// Host-side receiver for the three terminal signals.
pub trait OutcomeHandler<P, I> {
    fn success(&mut self, principal: P, info: Option<I>);

    fn fail(&mut self, reason: FailReason<I>, status: Option<StatusCode>);

    fn error(&mut self, err: VerifyError);
}
