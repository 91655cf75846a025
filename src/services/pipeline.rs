// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The `/cities` aggregation pipeline.

use crate::error::UpstreamError;
use crate::models::{CitiesResponse, EnrichedCityRecord, ValidatedCityRecord};
use crate::services::country::resolve_country_code;
use crate::services::validator;
use crate::services::{AuthTokenProvider, DescriptionEnricher, PollutionClient};
use futures_util::stream::{self, StreamExt};
use serde_json::Value;

/// Token → page fetch → validation → enrichment → response.
#[derive(Clone)]
pub struct AggregationPipeline {
    tokens: AuthTokenProvider,
    pollution: PollutionClient,
    enricher: DescriptionEnricher,
    /// Summary lookups in flight per request; 1 means strictly sequential.
    enrichment_concurrency: usize,
}

impl AggregationPipeline {
    pub fn new(
        tokens: AuthTokenProvider,
        pollution: PollutionClient,
        enricher: DescriptionEnricher,
        enrichment_concurrency: usize,
    ) -> Self {
        Self {
            tokens,
            pollution,
            enricher,
            enrichment_concurrency: enrichment_concurrency.max(1),
        }
    }

    /// Build one page of enriched cities.
    ///
    /// An unknown country is not an error: the upstream is queried without a
    /// country code. Invalid records are dropped without trace in the response.
    #[tracing::instrument(skip(self))]
    pub async fn aggregate(
        &self,
        page: u32,
        limit: u32,
        country: &str,
    ) -> Result<CitiesResponse, UpstreamError> {
        let country = country.trim();
        let country_code = resolve_country_code(country);
        if country_code.is_none() {
            tracing::debug!(country, "No country code, querying upstream without one");
        }

        let token = self.tokens.get_token().await?;

        let upstream = self
            .pollution
            .fetch_page(&token, page, limit, country_code)
            .await?;

        let received = upstream.results.len();
        let validated: Vec<ValidatedCityRecord> = upstream
            .results
            .iter()
            .filter_map(|record| validator::normalize(record, country))
            .collect();

        tracing::debug!(received, valid = validated.len(), "Filtered city records");

        let cities = self.enrich(validated).await;

        let reported_page = upstream
            .reported_page()
            .cloned()
            .unwrap_or_else(|| Value::from(page));

        Ok(CitiesResponse {
            page: reported_page,
            limit,
            cities,
        })
    }

    /// Attach descriptions, keeping the upstream order.
    async fn enrich(&self, records: Vec<ValidatedCityRecord>) -> Vec<EnrichedCityRecord> {
        stream::iter(records)
            .map(move |record| async move {
                let description = self.enricher.describe(&record.city).await;
                record.with_description(description)
            })
            .buffered(self.enrichment_concurrency)
            .collect()
            .await
    }
}
