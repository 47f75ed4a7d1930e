use axum::{extract::rejection::BytesRejection, http::{header, StatusCode}, response::{IntoResponse, Response}, Json};
use serde_json::Value;
use std::any::Any;
use thiserror::Error;
use tracing::{error, warn};

use crate::{models::ErrorBody, openai::UpstreamError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid request body: {reason}")]
    BodyRejected { status: StatusCode, reason: String },
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("Missing shape or material")]
    MissingFields,
    #[error("OPENAI_API_KEY is missing")]
    MissingCredential,
    #[error("OpenAI request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BodyRejected { status, .. } => *status,
            ApiError::InvalidBody(_) | ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::MethodNotAllowed => ErrorBody::new("Method not allowed"),
            ApiError::BodyRejected { reason, .. } => {
                ErrorBody::new("Invalid request body").with_details(Value::String(reason.clone()))
            }
            ApiError::InvalidBody(reason) => {
                ErrorBody::new("Invalid JSON body").with_details(Value::String(reason.clone()))
            }
            ApiError::MissingFields => ErrorBody::new("Missing shape or material"),
            ApiError::MissingCredential => ErrorBody::new("OPENAI_API_KEY is missing")
                .with_hint("Set OPENAI_API_KEY in the server environment or .env file"),
            ApiError::Upstream(upstream) => match upstream {
                UpstreamError::Transport(reason) => {
                    ErrorBody::new("OpenAI request failed").with_details(Value::String(reason.clone()))
                }
                UpstreamError::Status { body, .. } => {
                    ErrorBody::new("OpenAI request failed").with_details(body.clone())
                }
                UpstreamError::Decode(raw) => {
                    ErrorBody::new("Invalid OpenAI response").with_details(Value::String(raw.clone()))
                }
                UpstreamError::MissingImage { body } => {
                    ErrorBody::new("Invalid OpenAI response (missing b64_json or url)").with_details(body.clone())
                }
            },
        }
    }
}

// Oversized or unreadable bodies; keeps axum's status but answers in JSON.
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BodyRejected { status: rejection.status(), reason: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ Rejected request: {}", self);
        }

        let body = Json(self.body());
        match self {
            ApiError::MethodNotAllowed => {
                (status, [(header::ALLOW, "POST, OPTIONS")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

/// Last-resort 500 for a handler that panicked.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("💥 Handler panicked: {}", details);

    let body = ErrorBody::new("Server error").with_details(Value::String(details));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
