// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pollution-Cities: aggregate pollution-by-city pages with city descriptions
//!
//! This crate provides the backend API that logs in to the pollution data
//! upstream, filters the cities it returns and enriches each valid city with
//! a cached summary text.

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use cache::TtlCache;
use config::Config;
use services::{
    AggregationPipeline, AuthTokenProvider, DescriptionEnricher, PollutionClient, SummaryClient,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub pipeline: AggregationPipeline,
}

impl AppState {
    /// Build the process-wide state: one HTTP client and a fresh pair of caches.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = services::build_http_client()?;

        let pollution = PollutionClient::new(http.clone(), &config.pollution_api_url);
        let token_cache = Arc::new(TtlCache::new(config.token_ttl));
        let tokens =
            AuthTokenProvider::new(pollution.clone(), config.credentials.clone(), token_cache);

        let summary = SummaryClient::new(http, &config.summary_api_url);
        let description_cache = Arc::new(TtlCache::new(config.description_ttl));
        let enricher = DescriptionEnricher::new(summary, description_cache);

        let pipeline =
            AggregationPipeline::new(tokens, pollution, enricher, config.enrichment_concurrency);

        Ok(Self { config, pipeline })
    }
}
