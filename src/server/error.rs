//! HTTP error types and their mapping to status codes.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::entity::ContentKind;
use crate::error::FolioError;

/// Errors a content endpoint can answer with.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Invalid content kind '{provided}'. Valid kinds: project, article")]
    InvalidKind { provided: String },

    #[error("{kind} not found: {slug}")]
    NotFound { kind: ContentKind, slug: String },

    #[error("Content store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter { .. }
            | ApiError::InvalidQuery { .. }
            | ApiError::InvalidKind { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable name clients can branch on.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingParameter { .. } | ApiError::InvalidQuery { .. } => "InvalidRequest",
            ApiError::InvalidKind { .. } => "InvalidKind",
            ApiError::NotFound { .. } => "NotFound",
            ApiError::StoreUnavailable { .. } => "StoreUnavailable",
            ApiError::Internal { .. } => "InternalError",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            error_type: self.error_type(),
        }
    }
}

/// Error fields merged into an endpoint's normal response shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub error_type: &'static str,
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::StoreUnavailable(message) => ApiError::StoreUnavailable { message },
            FolioError::NotFound { kind, slug } => ApiError::NotFound { kind, slug },
            FolioError::InvalidRequest(message) => ApiError::InvalidQuery { message },
            FolioError::InvalidKind(provided) => ApiError::InvalidKind { provided },
            FolioError::Io(e) => ApiError::StoreUnavailable {
                message: format!("IO error: {}", e),
            },
            other => ApiError::Internal {
                message: other.to_string(),
            },
        }
    }
}
