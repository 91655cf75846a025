// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the pollution data upstream.
//!
//! Handles:
//! - Login exchange for a bearer token
//! - Fetching one page of pollution-by-city records

use crate::config::Credentials;
use crate::error::{AuthError, UpstreamError};
use crate::models::{LoginRequest, LoginResponse, PollutionPage};

/// Pollution upstream API client.
#[derive(Clone)]
pub struct PollutionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PollutionClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange the configured credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Upstream login failed");
            return Err(AuthError::Rejected(status.as_u16()));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        Ok(login.token)
    }

    /// Fetch one page of city records.
    ///
    /// `country` is left off the query entirely when no code was resolved.
    pub async fn fetch_page(
        &self,
        access_token: &str,
        page: u32,
        limit: u32,
        country: Option<&str>,
    ) -> Result<PollutionPage, UpstreamError> {
        let url = format!("{}/pollution", self.base_url);

        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(code) = country {
            query.push(("country", code.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Pollution upstream request failed");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))
    }
}
