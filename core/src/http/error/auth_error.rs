use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Errors raised by the Actix Web binding once the strategy has decided.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// No authenticated principal is attached to the request.
    #[display("unauthorized")]
    Unauthorized,
    /// The verifier reported an infrastructure failure.
    #[display("authentication unavailable")]
    Unavailable,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
