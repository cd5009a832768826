// Runtime data-source configuration (not gameplay tuning; see `consts`).

use std::time::Duration;

use crate::source::{Competition, HOUSES_API_PATH};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Prefix for the data API routes ("" = same origin)
    pub api_base: String,
    pub fetch_timeout: Duration,
    pub revalidation_token: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            revalidation_token: None,
        }
    }
}

impl SourceConfig {
    /// Read `HOUSE_CUP_*` environment variables, defaulting anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_base: non_empty("HOUSE_CUP_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            fetch_timeout: non_empty("HOUSE_CUP_FETCH_TIMEOUT_MS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            revalidation_token: non_empty("HOUSE_CUP_REVALIDATION_TOKEN"),
        }
    }

    pub fn houses_url(&self) -> String {
        format!("{}{}", self.api_base, HOUSES_API_PATH)
    }

    pub fn results_url(&self, competition: Competition) -> String {
        format!("{}{}", self.api_base, competition.api_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SourceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SourceConfig::default());
        assert_eq!(config.results_url(Competition::Chakravyuh), "/api/chakravyuh");
        assert_eq!(config.houses_url(), "/api/houses");
    }

    #[test]
    fn test_overrides() {
        let config = SourceConfig::from_lookup(lookup(&[
            ("HOUSE_CUP_API_BASE", "https://fest.example/"),
            ("HOUSE_CUP_FETCH_TIMEOUT_MS", "1500"),
            ("HOUSE_CUP_REVALIDATION_TOKEN", "s3cret"),
        ]));
        assert_eq!(config.houses_url(), "https://fest.example/api/houses");
        assert_eq!(config.fetch_timeout, Duration::from_millis(1500));
        assert_eq!(config.revalidation_token.as_deref(), Some("s3cret"));
        assert_eq!(
            config.results_url(Competition::Layatharang),
            "https://fest.example/api/layatharang"
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = SourceConfig::from_lookup(lookup(&[
            ("HOUSE_CUP_FETCH_TIMEOUT_MS", "soon"),
            ("HOUSE_CUP_REVALIDATION_TOKEN", "  "),
        ]));
        assert_eq!(config.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
        assert_eq!(config.revalidation_token, None);
    }
}
