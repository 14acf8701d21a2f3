// src/config.rs
// =============================================================================
// Tuning knobs for one analysis run.
//
// GET is used for content and gets the longer timeout; HEAD is only a cheap
// liveness probe. The sitemap/robots/TLS checks use their own short timeout.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_GET_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HEAD_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_CONCURRENCY: usize = 16;
pub const DEFAULT_USER_AGENT: &str = concat!("seo-probe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timeout for the primary page fetch and the timing re-fetch
    pub get_timeout: Duration,
    /// Timeout for link probes and the header probe
    pub head_timeout: Duration,
    /// Timeout for sitemap.xml, robots.txt and the TLS check
    pub resource_timeout: Duration,
    /// Maximum number of link probes in flight at once
    pub probe_concurrency: usize,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            get_timeout: DEFAULT_GET_TIMEOUT,
            head_timeout: DEFAULT_HEAD_TIMEOUT,
            resource_timeout: DEFAULT_RESOURCE_TIMEOUT,
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_probe_concurrency(mut self, limit: usize) -> Self {
        // A limit of zero would mean "unbounded" to the stream combinators
        self.probe_concurrency = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_timeout_asymmetry() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.get_timeout, Duration::from_secs(10));
        assert_eq!(config.head_timeout, Duration::from_secs(5));
        assert_eq!(config.resource_timeout, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("seo-probe/"));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let config = AnalyzerConfig::default().with_probe_concurrency(0);
        assert_eq!(config.probe_concurrency, 1);
    }
}
