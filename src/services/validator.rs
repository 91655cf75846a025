// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! City record validation.
//!
//! A record is kept only if its name is a plausible Latin-script city name
//! and its pollution value is a JSON number. Everything else is dropped
//! silently.

use crate::models::{RawCityRecord, ValidatedCityRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Letters, whitespace, periods, apostrophes and hyphens only.
static CITY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s.'-]+$").expect("city name pattern is valid"));

const MIN_CITY_NAME_LEN: usize = 2;

/// Decide whether an upstream record belongs in the result set.
pub fn is_valid(record: &RawCityRecord) -> bool {
    let Some(name) = record.get("name").and_then(Value::as_str) else {
        return false;
    };
    let name = name.trim();

    if !CITY_NAME.is_match(name) {
        return false;
    }

    if name.chars().count() < MIN_CITY_NAME_LEN {
        return false;
    }

    matches!(record.get("pollution"), Some(Value::Number(_)))
}

/// Validate `record` and normalize it, attaching the caller's country.
pub fn normalize(record: &RawCityRecord, country: &str) -> Option<ValidatedCityRecord> {
    if !is_valid(record) {
        return None;
    }

    let city = record.get("name").and_then(Value::as_str)?.trim().to_string();
    let pollution = match record.get("pollution") {
        Some(Value::Number(n)) => n.clone(),
        _ => return None,
    };

    Some(ValidatedCityRecord {
        city,
        country: country.trim().to_string(),
        pollution,
    })
}
