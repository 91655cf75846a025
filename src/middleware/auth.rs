// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP Basic authentication middleware.

use crate::config::Credentials;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Middleware that requires the configured Basic credentials.
///
/// Rejected requests never reach the handler, so no upstream call is made.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = basic_credentials(request.headers())
        .map(|(user, pass)| matches_credentials(&user, &pass, &state.config.credentials))
        .unwrap_or(false);

    if !authorized {
        tracing::debug!(uri = %request.uri(), "Rejected request without valid Basic credentials");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Extract `(username, password)` from an `Authorization: Basic ...` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;

    Some((user.to_string(), pass.to_string()))
}

/// Compare in constant time so response timing does not leak a prefix match.
fn matches_credentials(user: &str, pass: &str, expected: &Credentials) -> bool {
    let user_ok = user.as_bytes().ct_eq(expected.username.as_bytes());
    let pass_ok = pass.as_bytes().ct_eq(expected.password.as_bytes());
    bool::from(user_ok & pass_ok)
}
