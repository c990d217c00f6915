//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Defects in the routing configuration, rejected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid route '{route}' for {controller}.{action}: {reason}")]
    InvalidRoute {
        controller: String,
        action: String,
        route: String,
        reason: &'static str,
    },
    #[error("unsupported method '{method}' for {controller}.{action}")]
    UnsupportedMethod {
        controller: String,
        action: String,
        method: String,
    },
    #[error("route collision: {method} {route} claimed by both {first} and {second}")]
    RouteCollision {
        method: String,
        route: String,
        first: String,
        second: String,
    },
    #[error("config load: {0}")]
    Load(String),
}

/// Request-time failure reported through the generic error responder.
/// The status drives the HTTP response; anything without one is a 500.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ActionError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ActionError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("not found: {}", what.into()),
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
                details: None,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
