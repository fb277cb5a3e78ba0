//! HTTP error responses.
//!
//! Every failure leaves the gateway as `{"error": {"kind", "message"}}`. The
//! message is the stable text of the kind; provider details are only logged.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chat_gateway_application::HandleChatError;
use chat_gateway_domain::{DomainError, ErrorKind};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("provider failure ({kind}) after {attempts} attempt(s): {detail}")]
    Provider {
        kind: ErrorKind,
        attempts: u32,
        detail: String,
    },
    #[error("request cancelled")]
    Cancelled,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    error: ErrorBody,
}

impl ApiError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidInput(_) => Some(ErrorKind::InvalidInput),
            Self::Provider { kind, .. } => Some(*kind),
            Self::Cancelled => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            Some(ErrorKind::InvalidInput) => StatusCode::BAD_REQUEST,
            Some(ErrorKind::RateLimited | ErrorKind::ProviderUnavailable | ErrorKind::Timeout) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Some(ErrorKind::Unauthorized | ErrorKind::UnknownProviderError) => {
                StatusCode::BAD_GATEWAY
            }
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HandleChatError> for ApiError {
    fn from(err: HandleChatError) -> Self {
        match err {
            HandleChatError::InvalidInput(e) => Self::InvalidInput(e.to_string()),
            HandleChatError::Gateway { source, attempts } => Self::Provider {
                kind: source.kind(),
                attempts,
                detail: source.to_string(),
            },
            HandleChatError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Chat request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Chat request failed");
        }

        let error = match self.kind() {
            Some(kind) => ErrorBody {
                kind: kind.as_str(),
                message: kind.public_message(),
            },
            None => ErrorBody {
                kind: "Internal",
                message: "The request was not completed",
            },
        };
        (status, Json(ErrorPayload { error })).into_response()
    }
}
