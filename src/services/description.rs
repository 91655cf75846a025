// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! City description enrichment from the summary upstream.
//!
//! Lookups never fail from the caller's point of view: any problem turns into
//! [`FALLBACK_DESCRIPTION`], and that fallback is cached for the same TTL as a
//! real summary. A city whose lookup failed is therefore not retried until
//! its entry expires.

use crate::cache::TtlCache;
use crate::models::SummaryResponse;
use std::sync::Arc;

/// Description used whenever a summary cannot be obtained.
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Per-city description cache, keyed by the exact (case-sensitive) name.
pub type DescriptionCache = TtlCache<String, String>;

/// Why a summary lookup produced no text. Never leaves this module's callers.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("summary request failed: {0}")]
    Request(String),

    #[error("summary upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed summary response: {0}")]
    MalformedResponse(String),

    #[error("summary has no extract")]
    MissingExtract,
}

/// Summary upstream API client.
#[derive(Clone)]
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: String,
}

impl SummaryClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the summary extract for one topic.
    pub async fn fetch_extract(&self, topic: &str) -> Result<String, EnrichmentError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(topic));

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EnrichmentError::Status(response.status().as_u16()));
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;

        summary
            .extract
            .filter(|extract| !extract.is_empty())
            .ok_or(EnrichmentError::MissingExtract)
    }
}

/// Resolves city names to description text through the cache.
#[derive(Clone)]
pub struct DescriptionEnricher {
    client: SummaryClient,
    cache: Arc<DescriptionCache>,
}

impl DescriptionEnricher {
    pub fn new(client: SummaryClient, cache: Arc<DescriptionCache>) -> Self {
        Self { client, cache }
    }

    /// Describe `city`, from cache when possible.
    pub async fn describe(&self, city: &str) -> String {
        self.cache
            .get_or_insert_with(city.to_string(), move || async move {
                match self.client.fetch_extract(city).await {
                    Ok(extract) => extract,
                    Err(e) => {
                        tracing::warn!(
                            city,
                            error = %e,
                            "Summary lookup failed, caching fallback description"
                        );
                        FALLBACK_DESCRIPTION.to_string()
                    }
                }
            })
            .await
    }
}
