use std::future::Future;
use std::pin::Pin;

use actix_web::{dev, post, web, FromRequest, HttpMessage, HttpRequest, HttpResponse};

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::{EmailAddress, RequiredText};
use crate::error::{RestError, RestResult};
use crate::repo::{ContactStore, NewContact};

/// Validation switches for contact submissions
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPolicy {
    /// Reject emails that do not look like `local@domain.tld`
    pub validate_email_format: bool,
}

/// Raw contact form, accepted as either a JSON or a URL-encoded body
///
/// Unknown fields are ignored. Values stay untyped until validation so that
/// falsy JSON values can be told apart from text.
#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    name: Option<Value>,
    email: Option<Value>,
    message: Option<Value>,
}

impl ContactSubmission {
    /// Parse a request body according to its content type
    ///
    /// Empty bodies and unsupported content types produce an empty submission.
    pub fn from_body(content_type: &str, body: &[u8]) -> RestResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match content_type {
            "application/json" => serde_json::from_slice(body)
                .map_err(|e| RestError::MalformedBody(e.to_string())),
            "application/x-www-form-urlencoded" => Self::from_form(body),
            ct if ct.ends_with("+json") => serde_json::from_slice(body)
                .map_err(|e| RestError::MalformedBody(e.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a URL-encoded body; a repeated key keeps its last value
    fn from_form(body: &[u8]) -> RestResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| RestError::MalformedBody(e.to_string()))?;

        let fields: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| RestError::MalformedBody(e.to_string()))
    }

    /// Check that all fields are present and build the record to store
    pub fn validate(self, policy: &ContactPolicy) -> RestResult<NewContact> {
        let (Some(name), Some(email), Some(message)) = (
            RequiredText::from_value(self.name),
            RequiredText::from_value(self.email),
            RequiredText::from_value(self.message),
        ) else {
            return Err(RestError::MissingFields);
        };

        if policy.validate_email_format {
            email
                .as_ref()
                .parse::<EmailAddress>()
                .map_err(|_| RestError::InvalidEmail)?;
        }

        Ok(NewContact {
            name,
            email,
            message,
        })
    }
}

impl FromRequest for ContactSubmission {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        let content_type = req.content_type().to_ascii_lowercase();
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = body
                .await
                .map_err(|e| RestError::MalformedBody(e.to_string()))?;
            Self::from_body(&content_type, &body)
        })
    }
}

/// Create endpoint for contact submissions
#[tracing::instrument(name = "Save a contact submission", skip(store, policy, submission))]
#[post("/contact")]
async fn create(
    store: web::Data<dyn ContactStore>,
    policy: web::Data<ContactPolicy>,
    submission: ContactSubmission,
) -> RestResult<HttpResponse> {
    let new_contact = submission.validate(policy.get_ref())?;

    let id = store.insert(&new_contact).await.map_err(|e| {
        tracing::error!("Failed to save contact: {}", e);
        RestError::SaveFailed(e.to_string())
    })?;

    tracing::info!(%id, "Contact saved");

    Ok(HttpResponse::Created().json(json!({ "message": "Contact saved successfully" })))
}
