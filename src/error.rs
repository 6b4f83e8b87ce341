//! Application error type and its HTTP mapping.
//!
//! Every handler returns [`AppError`] on failure. JSON endpoints render it as
//!
//! ```json
//! { "error": "Invalid URL", "code": "invalid_input", "details": { "reason": "..." } }
//! ```
//!
//! HTML gate pages wrap it in [`crate::web::PageError`] instead.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON body returned for failed API requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "is_empty_details")]
    pub details: Value,
}

fn is_empty_details(details: &Value) -> bool {
    details.is_null() || details.as_object().is_some_and(|m| m.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request input, e.g. a destination that is not an absolute URL.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// Unknown or reserved short identifier.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The CAPTCHA provider did not accept the submitted token.
    #[error("{message}")]
    CaptchaRejected { message: String, details: Value },

    /// Every generated identifier collided with an existing one.
    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn captcha_rejected(message: impl Into<String>, details: Value) -> Self {
        Self::CaptchaRejected {
            message: message.into(),
            details,
        }
    }

    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } | Self::CaptchaRejected { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::GenerationExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::CaptchaRejected { .. } => "captcha_rejected",
            Self::GenerationExhausted { .. } => "generation_exhausted",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    fn into_body(self) -> ErrorBody {
        let code = self.code();
        let (message, details) = match self {
            Self::InvalidInput { message, details }
            | Self::NotFound { message, details }
            | Self::CaptchaRejected { message, details }
            | Self::GenerationExhausted { message, details }
            | Self::Internal { message, details } => (message, details),
        };

        ErrorBody {
            error: message,
            code,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Request failed: {}", self);
        }

        (status, Json(self.into_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::invalid_input("Invalid request", json!({ "fields": fields }))
    }
}
