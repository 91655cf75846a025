// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Country name to ISO 3166-1 alpha-2 code lookup.

/// Countries the pollution upstream is queried for.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Poland", "PL"),
    ("Germany", "DE"),
    ("Spain", "ES"),
    ("France", "FR"),
];

/// Resolve a country name to its two-letter code.
///
/// Matching ignores case and surrounding whitespace. Unknown names yield
/// `None`; that is not an error.
pub fn resolve_country_code(name: &str) -> Option<&'static str> {
    let normalized = name.trim();

    COUNTRY_CODES
        .iter()
        .find(|(country, _)| country.eq_ignore_ascii_case(normalized))
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_countries() {
        assert_eq!(resolve_country_code("Poland"), Some("PL"));
        assert_eq!(resolve_country_code("Germany"), Some("DE"));
        assert_eq!(resolve_country_code("Spain"), Some("ES"));
        assert_eq!(resolve_country_code("France"), Some("FR"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(resolve_country_code("  poland "), Some("PL"));
        assert_eq!(resolve_country_code("GERMANY"), Some("DE"));
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(resolve_country_code("Atlantis"), None);
        assert_eq!(resolve_country_code(""), None);
        assert_eq!(resolve_country_code("PL"), None);
    }
}
