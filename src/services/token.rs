// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token acquisition for the pollution upstream.

use crate::cache::TtlCache;
use crate::config::Credentials;
use crate::error::AuthError;
use crate::services::PollutionClient;
use std::sync::Arc;

const TOKEN_CACHE_KEY: &str = "auth_token";

/// Shared token cache type for use in AppState.
///
/// Holds at most one entry. Its TTL must be shorter than the upstream token
/// lifetime so a token is replaced before the upstream starts rejecting it.
pub type TokenCache = TtlCache<&'static str, String>;

/// Hands out a valid bearer token, logging in only when the cache is empty.
#[derive(Clone)]
pub struct AuthTokenProvider {
    client: PollutionClient,
    credentials: Credentials,
    cache: Arc<TokenCache>,
}

impl AuthTokenProvider {
    pub fn new(client: PollutionClient, credentials: Credentials, cache: Arc<TokenCache>) -> Self {
        Self {
            client,
            credentials,
            cache,
        }
    }

    /// Get a bearer token.
    ///
    /// 1. Cached token still inside its TTL: returned with no I/O
    /// 2. Otherwise one login exchange, shared by every caller waiting on
    ///    the cold cache
    ///
    /// Failed logins are not cached; the next call tries again.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        self.cache
            .get_or_try_insert_with(TOKEN_CACHE_KEY, move || async move {
                tracing::info!("Bearer token missing or expired, logging in");

                let token = self.client.login(&self.credentials).await?;

                tracing::info!(
                    ttl_secs = self.cache.ttl().as_secs(),
                    "Bearer token refreshed and cached"
                );
                Ok::<_, AuthError>(token)
            })
            .await
    }
}
