//! Verifier contract for the header API key strategy.
//!
//! The strategy never decides whether a key is valid. It hands the raw key to a
//! caller-supplied function together with a [`Verified`] completion handle and
//! waits for the handle to be completed. Completion may happen before the
//! verifier returns or later, from any task or thread.

use std::fmt;
use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use derive_more::{Display, Error};
use tokio::sync::oneshot;

use crate::http::security::outcome::{AuthOutcome, VerifyError};

type KeyFn<P, I> = dyn Fn(String, Verified<P, I>) + Send + Sync;
type KeyAndRequestFn<P, I> = dyn Fn(String, &ServiceRequest, Verified<P, I>) + Send + Sync;

/// A caller-supplied verification function, in one of its two call shapes.
///
/// # Example
/// ```ignore
/// let verifier = Verifier::key(|api_key, done| {
///     if api_key == "sk_live_abc123" {
///         done.success(json!({"id": "u1"}), None);
///     } else {
///         done.fail(Some(json!({"reason": "unknown key"})));
///     }
/// });
/// ```
pub enum Verifier<P, I> {
    /// Called as `(api_key, done)`.
    Key(Arc<KeyFn<P, I>>),
    /// Called as `(api_key, request, done)`.
    KeyAndRequest(Arc<KeyAndRequestFn<P, I>>),
}

impl<P, I> Verifier<P, I> {
    /// Wraps a verifier that only needs the key.
    pub fn key<F>(verify: F) -> Self
    where
        F: Fn(String, Verified<P, I>) + Send + Sync + 'static,
    {
        Verifier::Key(Arc::new(verify))
    }

    /// Wraps a verifier that also inspects the request.
    ///
    /// The request is only borrowed for the duration of the call; copy out
    /// what is needed before completing asynchronously.
    pub fn key_and_request<F>(verify: F) -> Self
    where
        F: Fn(String, &ServiceRequest, Verified<P, I>) + Send + Sync + 'static,
    {
        Verifier::KeyAndRequest(Arc::new(verify))
    }

    /// Whether this verifier expects the request as its second argument.
    pub fn takes_request(&self) -> bool {
        matches!(self, Verifier::KeyAndRequest(_))
    }
}

impl<P, I> Clone for Verifier<P, I> {
    fn clone(&self) -> Self {
        match self {
            Verifier::Key(verify) => Verifier::Key(Arc::clone(verify)),
            Verifier::KeyAndRequest(verify) => Verifier::KeyAndRequest(Arc::clone(verify)),
        }
    }
}

impl<P, I> fmt::Debug for Verifier<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verifier::Key(_) => f.write_str("Verifier::Key"),
            Verifier::KeyAndRequest(_) => f.write_str("Verifier::KeyAndRequest"),
        }
    }
}

/// What a verifier reports, in its raw tri-state form.
///
/// An error wins over everything else; without an error, the presence of a
/// principal decides between success and failure.
#[derive(Debug)]
pub struct VerificationOutcome<P, I> {
    pub error: Option<VerifyError>,
    pub principal: Option<P>,
    pub info: Option<I>,
}

impl<P, I> VerificationOutcome<P, I> {
    /// Maps the raw report to its terminal outcome.
    pub fn resolve(self) -> AuthOutcome<P, I> {
        if let Some(err) = self.error {
            return AuthOutcome::Error(err);
        }
        match self.principal {
            Some(principal) => AuthOutcome::Success {
                principal,
                info: self.info,
            },
            None => AuthOutcome::rejected(self.info),
        }
    }
}

/// Single-shot completion handle given to the verifier.
///
/// Every completion method consumes the handle, so an attempt can only be
/// completed once. Dropping the handle without completing it ends the attempt
/// with a [`VerifierDropped`] error.
pub struct Verified<P, I> {
    sender: oneshot::Sender<VerificationOutcome<P, I>>,
}

impl<P, I> Verified<P, I> {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<VerificationOutcome<P, I>>) {
        let (sender, receiver) = oneshot::channel();
        (Verified { sender }, receiver)
    }

    /// Completes with the raw tri-state report.
    pub fn complete(self, error: Option<VerifyError>, principal: Option<P>, info: Option<I>) {
        // A closed receiver means the host already gave up on the request.
        let _ = self.sender.send(VerificationOutcome {
            error,
            principal,
            info,
        });
    }

    /// The key is valid and belongs to `principal`.
    pub fn success(self, principal: P, info: Option<I>) {
        self.complete(None, Some(principal), info);
    }

    /// The key was rejected; `info` carries the reason, if any.
    pub fn fail(self, info: Option<I>) {
        self.complete(None, None, info);
    }

    /// The key could not be checked.
    pub fn error(self, err: impl Into<VerifyError>) {
        self.complete(Some(err.into()), None, None);
    }
}

impl<P, I> fmt::Debug for Verified<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verified")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// The verifier dropped its completion handle without completing it.
#[derive(Debug, Display, Error)]
#[display("verifier dropped its completion handle without reporting an outcome")]
pub struct VerifierDropped;

/// The verifier's call shape does not match `pass_request_to_verifier`.
#[derive(Debug, Display, Error)]
#[display(
    "verifier call shape mismatch: strategy passes the request = {passes_request}, verifier takes the request = {takes_request}"
)]
pub struct VerifierShapeMismatch {
    pub passes_request: bool,
    pub takes_request: bool,
}
