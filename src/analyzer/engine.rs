// src/analyzer/engine.rs
// =============================================================================
// The analysis engine.
//
// Only the primary page fetch can fail the analysis. After it succeeds, four
// independent groups run concurrently on the same task via tokio::join!:
// - link probes (bounded by the configured concurrency)
// - sitemap.xml / robots.txt / TLS checks
// - a HEAD request for the page's response headers
// - a second, timed GET for the load time
//
// Each group converts its own failures into fallback values, so the join
// always produces a complete set of inputs for the Report.
// =============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::progress::{ProgressTracker, FINISHED, PRIMARY_DONE, STARTED};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, FetchError};
use crate::extract::extract_page_signals;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::probe::ProbeScheduler;
use crate::report::Report;
use crate::resources::SiteResourceChecker;

const FAN_OUT_GROUPS: usize = 4;

pub struct Analyzer<F: ?Sized> {
    fetcher: Arc<F>,
    config: AnalyzerConfig,
}

impl Analyzer<HttpFetcher> {
    /// An analyzer backed by a real HTTP client built from `config`.
    pub fn with_http(config: AnalyzerConfig) -> Result<Self, AnalyzeError> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }
}

impl<F: Fetcher + ?Sized> Analyzer<F> {
    pub fn new(fetcher: Arc<F>, config: AnalyzerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Analyzes one page.
    ///
    /// `progress` receives 0 at the start, intermediate values as work
    /// completes, and 100 once the report is ready. It is not called with
    /// 100 when the analysis fails.
    ///
    /// Returns `AnalyzeError::Fetch` if the page itself cannot be fetched
    /// (no other request is made in that case) and `AnalyzeError::Cancelled`
    /// if `cancel` fires before the report is assembled.
    pub async fn analyze(
        &self,
        raw_url: &str,
        cancel: &CancellationToken,
        progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<Report, AnalyzeError> {
        progress(STARTED);
        let url = normalize_url(raw_url)?;

        if cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }

        info!(url = %url, "fetching page");
        let page = match self.fetcher.get(&url, self.config.get_timeout).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "page fetch failed, aborting analysis");
                return Err(e.into());
            }
        };

        if cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }
        progress(PRIMARY_DONE);

        let signals = extract_page_signals(&page.body);
        info!(
            url = %url,
            links = signals.anchors.len(),
            "page fetched, starting checks"
        );

        let tracker = ProgressTracker::new(progress, FAN_OUT_GROUPS);
        let probes = ProbeScheduler::new(
            Arc::clone(&self.fetcher),
            self.config.probe_concurrency,
            self.config.head_timeout,
        );
        let resources =
            SiteResourceChecker::new(Arc::clone(&self.fetcher), self.config.resource_timeout);

        let (broken_links, site, headers, load_time) = tokio::join!(
            async {
                let broken = probes.probe_all(&signals.anchors, cancel).await;
                tracker.group_done();
                broken
            },
            async {
                let site = resources.check_all(&url, cancel).await;
                tracker.group_done();
                site
            },
            async {
                let headers = self.collect_headers(&url, cancel).await;
                tracker.group_done();
                headers
            },
            async {
                let elapsed = self.time_page_load(&url, cancel).await;
                tracker.group_done();
                elapsed
            },
        );

        if cancel.is_cancelled() {
            info!(url = %url, "analysis cancelled");
            return Err(AnalyzeError::Cancelled);
        }

        let report = Report {
            title: signals.title,
            meta_description: signals.meta_description,
            load_time_seconds: load_time.unwrap_or(page.elapsed).as_secs_f64(),
            images_without_alt: signals.images_without_alt as u64,
            broken_links: broken_links as u64,
            canonical_url: signals.canonical_url,
            sitemap_found: site.sitemap_found,
            robots_found: site.robots_found,
            tls_configured: site.tls_configured,
            headers,
        };

        info!(
            url = %url,
            broken_links = report.broken_links,
            load_time = report.load_time_seconds,
            "analysis complete"
        );
        progress(FINISHED);
        Ok(report)
    }

    // Headers come from a HEAD of the page; any failure leaves them empty
    async fn collect_headers(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> BTreeMap<String, String> {
        if cancel.is_cancelled() {
            return BTreeMap::new();
        }
        match self.fetcher.head(url, self.config.head_timeout).await {
            Ok(response) => response.headers,
            Err(e) => {
                debug!(url, error = %e, "header probe failed");
                BTreeMap::new()
            }
        }
    }

    // The page is fetched again purely to time it. None if that fetch fails.
    async fn time_page_load(&self, url: &str, cancel: &CancellationToken) -> Option<Duration> {
        if cancel.is_cancelled() {
            return None;
        }
        let start = Instant::now();
        match self.fetcher.get(url, self.config.get_timeout).await {
            Ok(_) => Some(start.elapsed()),
            Err(e) => {
                debug!(url, error = %e, "timing fetch failed, using first fetch time");
                None
            }
        }
    }
}

/// Trims the input and prepends `http://` when no scheme is given.
pub fn normalize_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    // "example.com/?next=https://x" has no scheme even though it contains "://",
    // and "localhost:8080" parses with "localhost" as its scheme but no host
    let has_web_scheme = ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    let candidate = match Url::parse(trimmed) {
        Ok(url) if url.has_host() => trimmed.to_string(),
        _ if has_web_scheme => trimmed.to_string(),
        _ => format!("http://{trimmed}"),
    };

    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(candidate)
}

/// Analyzes `url` with the default configuration and a real HTTP client.
pub async fn analyze_url(url: &str) -> Result<Report, AnalyzeError> {
    let analyzer = Analyzer::with_http(AnalyzerConfig::default())?;
    analyzer
        .analyze(url, &CancellationToken::new(), &|_| {})
        .await
}
