// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod city;
pub mod upstream;

pub use city::{CitiesResponse, EnrichedCityRecord, RawCityRecord, ValidatedCityRecord};
pub use upstream::{LoginRequest, LoginResponse, PageMeta, PollutionPage, SummaryResponse};
