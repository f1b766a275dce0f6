// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route errors: what loaders, actions, and renders can fail with.

use serde_json::Value;

/// An error response produced by a loader or action (for example a 404).
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
    /// Response payload.
    pub data: Value,
}

impl ErrorResponse {
    /// Creates a response with a null payload.
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            data: Value::Null,
        }
    }
}

/// A route-level error.
///
/// Route errors are recoverable: the boundary ladder displays them and heals
/// on the next location change. [`RouteError::AbortedDeferred`] is special and
/// is never displayed; deferred values that end in it freeze their fallback.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// A thrown error response.
    #[error("{} {}", .0.status, .0.status_text)]
    Response(ErrorResponse),
    /// A thrown error with a message and optional stack trace.
    #[error("{message}")]
    Thrown {
        /// Error message.
        message: String,
        /// Stack trace, when the producer captured one.
        stack: Option<String>,
    },
    /// Any other thrown value.
    #[error("{0}")]
    Value(Value),
    /// The navigation that produced a deferred value was superseded.
    #[error("deferred data aborted")]
    AbortedDeferred,
}

impl RouteError {
    /// A thrown error with only a message.
    #[must_use]
    pub fn thrown(message: impl Into<String>) -> Self {
        Self::Thrown {
            message: message.into(),
            stack: None,
        }
    }

    /// A thrown error with a message and a stack trace.
    #[must_use]
    pub fn with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self::Thrown {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// Whether this is the aborted-deferred condition.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::AbortedDeferred)
    }

    /// Stack trace, if any.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        match self {
            Self::Thrown { stack, .. } => stack.as_deref(),
            _ => None,
        }
    }
}

impl From<ErrorResponse> for RouteError {
    fn from(response: ErrorResponse) -> Self {
        Self::Response(response)
    }
}

/// Whether `error` is an error response rather than a thrown error.
#[must_use]
pub fn is_route_error_response(error: &RouteError) -> bool {
    matches!(error, RouteError::Response(_))
}
