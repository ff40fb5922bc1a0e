use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// JSON body returned for every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Authentication error: {detail}")]
    AuthenticationFault { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Short error title written to the `error` field
    fn title(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired => "Authentication required",
            AppError::InvalidToken => "Invalid or expired token",
            AppError::AuthenticationFault { .. } => "Authentication error",
            AppError::Internal { .. } => "Internal server error",
            AppError::Config { .. } => "Configuration error",
        }
    }

    /// Client-facing message written to the `message` field.
    /// Internal details stay in logs.
    fn message(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired => "Please log in to access this resource",
            AppError::InvalidToken => "Please log in again",
            AppError::AuthenticationFault { .. } => {
                "An error occurred while verifying your authentication"
            }
            AppError::Internal { .. } | AppError::Config { .. } => "An unexpected error occurred",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AuthenticationFault { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.title().to_string(),
            message: self.message().to_string(),
        }
    }

    pub fn authentication_required() -> Self {
        Self::AuthenticationRequired
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn authentication_fault(detail: impl Into<String>) -> Self {
        Self::AuthenticationFault {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        // Auth faults are logged by the gate with their request context
        if let AppError::Internal { detail } | AppError::Config { detail } = self {
            error!(%trace_id, detail = %Redacted(detail.as_str()), "{}", self.title());
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(self.body())
    }
}
