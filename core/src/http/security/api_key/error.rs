//! API Key client input errors.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};

/// Client input problems detected by the strategy before the verifier runs.
///
/// These always end the attempt as a failure with a bad request
/// classification. They are never escalated to an error outcome, and they are
/// distinct from rejections reported by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ApiKeyError {
    /// The configured header is absent or empty.
    #[display("Missing API Key")]
    Missing,

    /// The configured header holds bytes that are not visible ASCII.
    #[display("Malformed API Key, {header} header is not valid text")]
    Malformed { header: String },

    /// The header value does not start with the configured prefix.
    #[display("Invalid API Key prefix, {header} header should start with \"{prefix}\"")]
    InvalidPrefix { header: String, prefix: String },
}

impl ApiKeyError {
    /// Whether this diagnostic is classified as a bad request.
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

impl ResponseError for ApiKeyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiKeyError::Missing
            | ApiKeyError::Malformed { .. }
            | ApiKeyError::InvalidPrefix { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = status.canonical_reason().unwrap_or("Error");
        let body = serde_json::json!({
            "error": error,
            "message": self.to_string(),
        });

        HttpResponse::build(status).json(body)
    }
}
