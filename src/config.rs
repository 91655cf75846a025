// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. Every variable has a
//! default so the server starts with no environment at all.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Page requested from the pollution upstream when the caller gives none.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size requested from the pollution upstream when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 10;

/// Realm advertised in the Basic auth challenge.
pub const AUTH_REALM: &str = "cities";

/// The single username/password pair.
///
/// Used both to gate inbound requests and to log in to the pollution upstream.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Inbound gate and upstream login credentials
    pub credentials: Credentials,
    /// Base URL of the identity + pollution upstream
    pub pollution_api_url: String,
    /// Base URL of the summary upstream; the city name is appended as a path segment
    pub summary_api_url: String,
    /// Lifetime of the cached bearer token, kept below the upstream expiry
    pub token_ttl: Duration,
    /// Lifetime of cached descriptions (successes and fallbacks alike)
    pub description_ttl: Duration,
    /// Number of summary lookups allowed in flight per request
    pub enrichment_concurrency: usize,
}

impl Config {
    /// Config for tests only. Upstream URLs point nowhere useful and are
    /// expected to be overridden.
    pub fn test_default() -> Self {
        Self {
            port: 3000,
            credentials: Credentials {
                username: "testuser".to_string(),
                password: "testpass".to_string(),
            },
            pollution_api_url: "http://127.0.0.1:9".to_string(),
            summary_api_url: "http://127.0.0.1:9/summary".to_string(),
            token_ttl: Duration::from_secs(3500),
            description_ttl: Duration::from_secs(3600),
            enrichment_concurrency: 1,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let enrichment_concurrency: usize = parse_var("ENRICHMENT_CONCURRENCY", 1)?;
        if enrichment_concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: "ENRICHMENT_CONCURRENCY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            credentials: Credentials {
                username: credential_var("API_USERNAME", "testuser"),
                password: credential_var("API_PASSWORD", "testpass"),
            },
            pollution_api_url: env::var("POLLUTION_API_URL")
                .unwrap_or_else(|_| "https://be-recruitment-task.onrender.com".to_string()),
            summary_api_url: env::var("SUMMARY_API_URL").unwrap_or_else(|_| {
                "https://en.wikipedia.org/api/rest_v1/page/summary".to_string()
            }),
            token_ttl: Duration::from_secs(parse_var("TOKEN_TTL_SECS", 3500)?),
            description_ttl: Duration::from_secs(parse_var("DESCRIPTION_TTL_SECS", 3600)?),
            enrichment_concurrency,
        })
    }
}

/// Read `name` and parse it, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Read a credential, ignoring whitespace picked up from `.env` files.
fn credential_var(name: &str, default: &str) -> String {
    env::var(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| default.to_string())
}
