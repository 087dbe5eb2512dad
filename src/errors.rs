//! Structured error handling for the CarbonScoreX service.
//!
//! Three request-visible failure classes exist: artifact problems are
//! confined to startup (the service degrades to fallback scoring instead of
//! surfacing them to callers), prediction failures are request-scoped server
//! errors, and validation failures are client errors rejected at the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the carbon scoring service
#[derive(Error, Debug)]
pub enum CarbonError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Model artifact failure: {stage} - {message}")]
    Artifact { stage: String, message: String },

    #[error("Prediction failed: {stage} - {message}")]
    Prediction { stage: String, message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Result with CarbonError
pub type CarbonResult<T> = Result<T, CarbonError>;

impl CarbonError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a model artifact error
    pub fn artifact(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Prediction {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for CarbonError {
    fn into_response(self) -> Response {
        let status = match self {
            CarbonError::Validation { .. } | CarbonError::Serialization { .. } => {
                StatusCode::BAD_REQUEST
            }
            // Server-side failures
            CarbonError::Config { .. }
            | CarbonError::Artifact { .. }
            | CarbonError::Prediction { .. }
            | CarbonError::Io { .. }
            | CarbonError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = axum::Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for CarbonError {
    fn from(err: serde_json::Error) -> Self {
        CarbonError::serialization("json_operation", err)
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for CarbonError {
    fn from(err: std::io::Error) -> Self {
        CarbonError::io("io_operation", err)
    }
}

/// Convert from String errors
impl From<String> for CarbonError {
    fn from(err: String) -> Self {
        CarbonError::Internal { message: err }
    }
}
