use serde_json::Value;
use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "Bad request, e.g. invalid data was sent in the request.";
pub const INVALID_SUBSCRIPTION_KEY_MESSAGE: &str = "Invalid subscription key";
pub const RESOURCE_NOT_FOUND_MESSAGE: &str = "Not found, reference id not found or closed in sandbox";
pub const CONFLICT_MESSAGE: &str = "Conflict, duplicated reference id";
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Error. Note that if the retrieved request to pay has failed, \
                                                 it will not cause this status to be returned. This status is only \
                                                 returned if the GET request itself fails.";

#[derive(Debug, Error)]
pub enum MomoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not deserialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    InvalidSubscriptionKey(String),
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InternalServerError(String),
    #[error("Operation failed with status: {status} | Content: {message}")]
    QueryError { status: u16, message: String },
}

impl MomoApiError {
    /// The HTTP status this error mirrors. Only errors produced from a provider response carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::InvalidSubscriptionKey(_) => Some(401),
            Self::ResourceNotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::InternalServerError(_) => Some(500),
            Self::QueryError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(m)
            | Self::InvalidSubscriptionKey(m)
            | Self::ResourceNotFound(m)
            | Self::Conflict(m)
            | Self::InternalServerError(m) => m.clone(),
            other => other.to_string(),
        }
    }

    /// True for the errors that were mapped from a non-success provider response.
    pub fn is_api_error(&self) -> bool {
        self.status_code().is_some()
    }
}

/// Converts a non-success provider response into the matching [`MomoApiError`].
///
/// The table is keyed on the exact status code. Except for 400, the provider's `message` field is used when the body
/// is JSON and carries one, falling back to a fixed description otherwise. Any status outside the table becomes a
/// [`MomoApiError::QueryError`] holding the raw body text.
pub fn error_from_response(status: u16, body: &str) -> MomoApiError {
    let message = || provider_message(body);
    match status {
        400 => MomoApiError::BadRequest(BAD_REQUEST_MESSAGE.to_string()),
        401 => MomoApiError::InvalidSubscriptionKey(
            message().unwrap_or_else(|| INVALID_SUBSCRIPTION_KEY_MESSAGE.to_string()),
        ),
        404 => MomoApiError::ResourceNotFound(message().unwrap_or_else(|| RESOURCE_NOT_FOUND_MESSAGE.to_string())),
        409 => MomoApiError::Conflict(message().unwrap_or_else(|| CONFLICT_MESSAGE.to_string())),
        500 => {
            MomoApiError::InternalServerError(message().unwrap_or_else(|| INTERNAL_SERVER_ERROR_MESSAGE.to_string()))
        },
        status => MomoApiError::QueryError { status, message: body.to_string() },
    }
}

fn provider_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value["message"].as_str().map(String::from)
}
