// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the upstream APIs.

use super::city::RawCityRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response; only the token is used.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// One page of `GET /pollution`.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionPage {
    #[serde(default)]
    pub meta: Option<PageMeta>,
    pub results: Vec<RawCityRecord>,
}

impl PollutionPage {
    /// Page number the upstream reported, whatever its JSON type.
    pub fn reported_page(&self) -> Option<&Value> {
        self.meta.as_ref().and_then(|meta| meta.page.as_ref())
    }
}

/// Paging metadata. `page` is echoed back untouched, so it is not typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<Value>,
}

/// Page summary from the description source.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub extract: Option<String>,
}
