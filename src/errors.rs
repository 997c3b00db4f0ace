// ABOUTME: Unified error handling for the FitTrack client core
// ABOUTME: Defines standard error codes, the AppError type, and a serializable error response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Unified Error Handling
//!
//! Centralized error types for the client core. Every fallible operation in the
//! crate returns [`AppResult`], and each failure carries an [`ErrorCode`] so
//! callers can distinguish the cases that matter to the UI: a backend that is
//! not ready yet, a remote rejection, a local validation failure, and transport
//! problems. Absence of server-side data (no history, no stats, no profile) is
//! never an error and never passes through this module.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1001,

    // Backend lifecycle (2000-2999)
    #[serde(rename = "BACKEND_UNINITIALIZED")]
    BackendUninitialized = 2000,

    // Remote operations (3000-3999)
    #[serde(rename = "REMOTE_REJECTED")]
    RemoteRejected = 3000,
    #[serde(rename = "TRANSPORT_ERROR")]
    TransportError = 3001,

    // Local validation (4000-4999)
    #[serde(rename = "LOCAL_VALIDATION")]
    LocalValidation = 4000,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::BackendUninitialized => "The backend connection is not initialized yet",
            Self::RemoteRejected => "The backend rejected the operation",
            Self::TransportError => "Communication with the backend failed",
            Self::LocalValidation => "The provided input is invalid",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether a failed user action with this code can succeed on a plain retry.
    ///
    /// Uninitialized-backend failures resolve themselves once initialization
    /// completes; everything else requires the user (or operator) to change
    /// something first.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendUninitialized | Self::TransportError)
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Caller lacks the role required for this operation
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Call attempted before the backend access layer finished initializing
    #[must_use]
    pub fn backend_uninitialized() -> Self {
        Self::new(ErrorCode::BackendUninitialized, "Backend not initialized")
    }

    /// Backend declined the operation (validation, authorization)
    pub fn remote_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteRejected, message)
    }

    /// Request never produced a response (connect failure, broken stream)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportError, message)
    }

    /// Input rejected before any remote call was made
    pub fn local_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LocalValidation, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error format for surfacing failures to a display layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error.to_string()).with_source(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_distinct_from_remote_rejection() {
        let uninit = AppError::backend_uninitialized();
        let rejected = AppError::remote_rejected("plan name too long");

        assert_eq!(uninit.code, ErrorCode::BackendUninitialized);
        assert_eq!(rejected.code, ErrorCode::RemoteRejected);
        assert_ne!(uninit.code, rejected.code);
        assert!(uninit.code.is_transient());
        assert!(!rejected.code.is_transient());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::local_validation("Please add at least one exercise with sets");
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("LOCAL_VALIDATION"));
        assert!(json.contains("at least one exercise"));
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::remote_rejected("duplicate name");
        let rendered = error.to_string();
        assert!(rendered.contains("rejected"));
        assert!(rendered.contains("duplicate name"));
    }
}
