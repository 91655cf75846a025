// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! City records as they move through the aggregation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A city entry exactly as the pollution upstream sent it.
///
/// Kept as raw JSON: nothing beyond `name` and `pollution` is validated, and
/// an entry of the wrong shape must be dropped rather than fail the page.
pub type RawCityRecord = serde_json::Value;

/// A record that passed validation, normalized for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedCityRecord {
    /// Trimmed city name
    pub city: String,
    /// Country name as supplied by the caller (trimmed)
    pub country: String,
    /// Pollution measure, integer or fractional as received
    pub pollution: Number,
}

impl ValidatedCityRecord {
    /// Attach a description, producing the record returned to the caller.
    pub fn with_description(self, description: String) -> EnrichedCityRecord {
        EnrichedCityRecord {
            city: self.city,
            country: self.country,
            pollution: self.pollution,
            description,
        }
    }
}

/// A validated record plus its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCityRecord {
    pub city: String,
    pub country: String,
    pub pollution: Number,
    pub description: String,
}

/// Response body of `GET /cities`.
///
/// There is no total count: the upstream does not report one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitiesResponse {
    /// Page number as reported by the upstream, or the requested one if it
    /// reported none
    pub page: Value,
    /// Page size as requested by the caller
    pub limit: u32,
    pub cities: Vec<EnrichedCityRecord>,
}
