use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde_json::json;

use thiserror::Error;

pub type RestResult<T> = Result<T, RestError>;

/// Errors returned to clients of the contact API
///
/// Every variant is reported as `400 Bad Request` with a `{"error": ...}` body,
/// including storage failures.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Error saving contact: {0}")]
    SaveFailed(String),
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields
            | Self::InvalidEmail
            | Self::MalformedBody(_)
            | Self::SaveFailed(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
