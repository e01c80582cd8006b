use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static EXPLICIT_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{3})\b").unwrap());
static DESTINATION_PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bto\s+([\p{L}\s]+)").unwrap());
static STOP_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:for|with|on|in|by|during|next|this|today|tomorrow|from)\b").unwrap()
});

/// Built-in alias table: (alias key, canonical city, provider code).
const DEFAULT_ALIASES: &[(&str, &str, &str)] = &[
    ("new york city", "New York", "NYC"),
    ("new york", "New York", "NYC"),
    ("nyc", "New York", "NYC"),
    ("los angeles", "Los Angeles", "LAX"),
    ("lax", "Los Angeles", "LAX"),
    ("san francisco", "San Francisco", "SFO"),
    ("sfo", "San Francisco", "SFO"),
    ("london", "London", "LON"),
    ("lon", "London", "LON"),
    ("lhr", "London", "LHR"),
    ("paris", "Paris", "PAR"),
    ("par", "Paris", "PAR"),
    ("tokyo", "Tokyo", "TYO"),
    ("tyo", "Tokyo", "TYO"),
    ("madrid", "Madrid", "MAD"),
    ("mad", "Madrid", "MAD"),
    ("barcelona", "Barcelona", "BCN"),
    ("bcn", "Barcelona", "BCN"),
    ("rome", "Rome", "ROM"),
    ("rom", "Rome", "ROM"),
    ("san diego", "San Diego", "SAN"),
    ("san", "San Diego", "SAN"),
    ("chicago", "Chicago", "CHI"),
    ("chi", "Chicago", "CHI"),
    ("miami", "Miami", "MIA"),
    ("mia", "Miami", "MIA"),
    ("boston", "Boston", "BOS"),
    ("bos", "Boston", "BOS"),
];

/// Outcome of parsing a free-text query for a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDestination {
    pub destination: Option<String>,
    pub destination_code: Option<String>,
}

impl ResolvedDestination {
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// True when either a city or a provider code could be extracted.
    pub fn is_resolved(&self) -> bool {
        self.destination.is_some() || self.destination_code.is_some()
    }
}

/// One row of the alias table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationAlias {
    pub key: String,
    pub city: String,
    pub code: String,
}

impl DestinationAlias {
    pub fn new(key: &str, city: &str, code: &str) -> Self {
        Self {
            key: key.to_lowercase(),
            city: city.to_string(),
            code: code.to_string(),
        }
    }
}

impl From<&DestinationAlias> for ResolvedDestination {
    fn from(alias: &DestinationAlias) -> Self {
        Self {
            destination: Some(alias.city.clone()),
            destination_code: Some(alias.code.clone()),
        }
    }
}

/// Turns free-text travel queries into a canonical city and provider code.
///
/// The alias table is read-only once built. Keys are sorted by descending
/// length at construction (stable on table order), so the prefix match is a
/// single pass where the first hit is the longest alias.
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    by_length: Vec<DestinationAlias>,
    by_key: HashMap<String, usize>,
}

impl DestinationResolver {
    pub fn new(aliases: Vec<DestinationAlias>) -> Self {
        let mut by_length = aliases;
        by_length.sort_by(|a, b| b.key.len().cmp(&a.key.len()));

        let mut by_key = HashMap::with_capacity(by_length.len());
        for (idx, alias) in by_length.iter().enumerate() {
            by_key.entry(alias.key.clone()).or_insert(idx);
        }

        Self { by_length, by_key }
    }

    pub fn aliases(&self) -> &[DestinationAlias] {
        &self.by_length
    }

    /// Resolve a query. `None` (no query at all) resolves to nothing.
    ///
    /// 1. An explicit uppercase 3-letter token wins: known alias codes map to
    ///    their city, unknown ones are passed through as the code.
    /// 2. Otherwise the phrase after "to" is cut at the first stop word or
    ///    punctuation mark and prefix-matched against the alias keys.
    pub fn resolve<'q>(&self, query: impl Into<Option<&'q str>>) -> ResolvedDestination {
        let Some(query) = query.into() else {
            return ResolvedDestination::unresolved();
        };

        if let Some(candidate) = EXPLICIT_CODE_RE.captures(query).and_then(|c| c.get(1)) {
            let candidate = candidate.as_str().to_uppercase();
            return match self.lookup(&candidate.to_lowercase()) {
                Some(alias) => alias.into(),
                None => ResolvedDestination {
                    destination: None,
                    destination_code: Some(candidate),
                },
            };
        }

        let raw = DESTINATION_PHRASE_RE
            .captures(query)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if raw.is_empty() {
            return ResolvedDestination::unresolved();
        }

        let phrase = truncate_phrase(raw);
        if phrase.is_empty() {
            return ResolvedDestination::unresolved();
        }

        let normalized = phrase.to_lowercase();
        if let Some(alias) = self
            .by_length
            .iter()
            .find(|alias| normalized.starts_with(alias.key.as_str()))
        {
            return alias.into();
        }

        ResolvedDestination {
            destination: Some(phrase.to_string()),
            destination_code: None,
        }
    }

    fn lookup(&self, key: &str) -> Option<&DestinationAlias> {
        self.by_key.get(key).map(|&idx| &self.by_length[idx])
    }
}

impl Default for DestinationResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALIASES
                .iter()
                .map(|(key, city, code)| DestinationAlias::new(key, city, code))
                .collect(),
        )
    }
}

/// Cut a destination phrase at the first stop word or `,.!?`, whichever comes first.
fn truncate_phrase(raw: &str) -> &str {
    let stop_at = STOP_WORD_RE.find(raw).map(|m| m.start());
    let punct_at = raw.find([',', '.', '!', '?']);

    let cut = match (stop_at, punct_at) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => raw.len(),
    };

    raw[..cut].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(city: &str, code: &str) -> ResolvedDestination {
        ResolvedDestination {
            destination: Some(city.to_string()),
            destination_code: Some(code.to_string()),
        }
    }

    #[test]
    fn test_explicit_alias_code() {
        let resolver = DestinationResolver::default();
        assert_eq!(resolver.resolve("Cheap flights to LON please"), resolved("London", "LON"));
        assert_eq!(resolver.resolve("LHR next friday"), resolved("London", "LHR"));
        assert_eq!(resolver.resolve("weekend in BCN"), resolved("Barcelona", "BCN"));
    }

    #[test]
    fn test_unknown_explicit_code_is_passed_through() {
        let resolver = DestinationResolver::default();
        let result = resolver.resolve("fly me to JFK");
        assert_eq!(result.destination, None);
        assert_eq!(result.destination_code.as_deref(), Some("JFK"));
    }

    #[test]
    fn test_lowercase_three_letter_words_are_not_codes() {
        let resolver = DestinationResolver::default();
        assert_eq!(
            resolver.resolve("flights to london for 3 nights"),
            resolved("London", "LON")
        );
    }

    #[test]
    fn test_trailing_stop_word_or_punctuation_does_not_change_result() {
        let resolver = DestinationResolver::default();
        let base = resolver.resolve("to london");
        assert_eq!(base, resolved("London", "LON"));
        assert_eq!(resolver.resolve("to london for 3 nights"), base);
        assert_eq!(resolver.resolve("to london, soon"), base);
        assert_eq!(resolver.resolve("to London tomorrow!"), base);
        assert_eq!(resolver.resolve("to london with my family"), base);
    }

    #[test]
    fn test_longest_alias_wins() {
        let resolver = DestinationResolver::default();
        assert_eq!(resolver.resolve("trip to san francisco"), resolved("San Francisco", "SFO"));
        assert_eq!(resolver.resolve("trip to san diego"), resolved("San Diego", "SAN"));
        assert_eq!(resolver.resolve("moving to new york city"), resolved("New York", "NYC"));
    }

    #[test]
    fn test_alias_match_is_prefix_based() {
        let resolver = DestinationResolver::default();
        assert_eq!(resolver.resolve("tickets to london eye tour"), resolved("London", "LON"));
    }

    #[test]
    fn test_unknown_city_keeps_original_case() {
        let resolver = DestinationResolver::default();
        let result = resolver.resolve("a holiday to Zürich in May");
        assert_eq!(result.destination.as_deref(), Some("Zürich"));
        assert_eq!(result.destination_code, None);
    }

    #[test]
    fn test_unresolvable_queries() {
        let resolver = DestinationResolver::default();
        assert_eq!(resolver.resolve(""), ResolvedDestination::unresolved());
        assert_eq!(resolver.resolve(None::<&str>), ResolvedDestination::unresolved());
        assert_eq!(resolver.resolve("no destination here"), ResolvedDestination::unresolved());
        assert_eq!(resolver.resolve("going to 123"), ResolvedDestination::unresolved());
        assert_eq!(resolver.resolve("to for a week"), ResolvedDestination::unresolved());
        assert!(!resolver.resolve("   ").is_resolved());
    }

    #[test]
    fn test_custom_alias_table() {
        let resolver = DestinationResolver::new(vec![
            DestinationAlias::new("Lisbon", "Lisbon", "LIS"),
            DestinationAlias::new("lis", "Lisbon", "LIS"),
        ]);
        assert_eq!(resolver.resolve("to lisbon by train"), resolved("Lisbon", "LIS"));
        assert_eq!(resolver.resolve("LIS"), resolved("Lisbon", "LIS"));
        assert_eq!(resolver.aliases()[0].key, "lisbon");
    }

    #[test]
    fn test_truncate_phrase() {
        assert_eq!(truncate_phrase("paris on sunday"), "paris");
        assert_eq!(truncate_phrase("Berlin"), "Berlin");
        assert_eq!(truncate_phrase("rome. then"), "rome");
        assert_eq!(truncate_phrase("from"), "");
    }

    #[test]
    fn test_serializes_camel_case_with_nulls() {
        let value = serde_json::to_value(ResolvedDestination::unresolved()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "destination": null, "destinationCode": null })
        );
    }
}
