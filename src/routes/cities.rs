// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The aggregated cities endpoint.

use crate::config::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::error::Result;
use crate::models::CitiesResponse;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Cities routes (require Basic authentication).
/// The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/cities", get(get_cities))
}

/// Raw query parameters. Kept as strings so a malformed value falls back to
/// its default instead of producing a client error.
#[derive(Deserialize)]
struct CitiesQuery {
    page: Option<String>,
    limit: Option<String>,
    country: Option<String>,
}

fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Get one page of cities with descriptions.
async fn get_cities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CitiesQuery>,
) -> Result<Json<CitiesResponse>> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_positive(query.limit.as_deref(), DEFAULT_LIMIT);
    let country = query.country.as_deref().unwrap_or("");

    let response = state.pipeline.aggregate(page, limit, country).await?;

    tracing::info!(
        page = %response.page,
        limit,
        cities = response.cities.len(),
        "Served cities page"
    );

    Ok(Json(response))
}
