use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// `SCORING_API_BASE_URL`
    pub base_url: String,
    /// `SCORING_TIMEOUT_SECS`; no transport timeout when unset.
    pub timeout: Option<Duration>,
    /// `MAP_PROVIDER_KEY`, handed to hosts for their map surface.
    pub map_provider_key: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            map_provider_key: None,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("SCORING_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = lookup("SCORING_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!("ignoring invalid SCORING_TIMEOUT_SECS={raw:?}");
                None
            }
        });
        let map_provider_key = lookup("MAP_PROVIDER_KEY").filter(|v| !v.is_empty());
        Self {
            base_url,
            timeout,
            map_provider_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
