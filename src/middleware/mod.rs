// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (inbound authentication).

pub mod auth;

pub use auth::require_basic_auth;
