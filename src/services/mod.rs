// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod country;
pub mod description;
pub mod pipeline;
pub mod pollution;
pub mod token;
pub mod validator;

pub use description::{DescriptionCache, DescriptionEnricher, SummaryClient, FALLBACK_DESCRIPTION};
pub use pipeline::AggregationPipeline;
pub use pollution::PollutionClient;
pub use token::{AuthTokenProvider, TokenCache};

/// Build the HTTP client shared by every upstream client.
///
/// The summary source rejects anonymous clients, so a user agent is always sent.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}
