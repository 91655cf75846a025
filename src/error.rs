// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Callers only ever see two failure shapes: a Basic auth challenge (401)
//! or a generic internal error (500). Everything else is logged.

use crate::config::AUTH_REALM;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Login exchange with the identity upstream failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login request failed: {0}")]
    Request(String),

    #[error("login rejected with HTTP {0}")]
    Rejected(u16),

    #[error("malformed login response: {0}")]
    MalformedResponse(String),
}

/// Fetching a page from the pollution upstream failed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("pollution request failed: {0}")]
    Request(String),

    #[error("pollution upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed pollution response: {0}")]
    MalformedResponse(String),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => {
                let challenge = format!("Basic realm=\"{}\"", AUTH_REALM);
                let mut response =
                    (StatusCode::UNAUTHORIZED, "Authentication required.").into_response();
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response
                        .headers_mut()
                        .insert(header::WWW_AUTHENTICATE, value);
                }
                response
            }
            AppError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    let body = ErrorResponse {
        error: "Internal Server Error",
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
