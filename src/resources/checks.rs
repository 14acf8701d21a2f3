// src/resources/checks.rs
// =============================================================================
// The three site resource checks.
//
// - sitemap: GET {root}/sitemap.xml, found only on HTTP 200
// - robots:  GET {root}/robots.txt, found only on HTTP 200
// - tls:     GET the page over https://, configured if the server answered
//            at all (any status); every failure counts as "not configured"
//
// The checks are independent and run concurrently in `check_all`.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::fetch::Fetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteResources {
    pub sitemap_found: bool,
    pub robots_found: bool,
    pub tls_configured: bool,
}

pub struct SiteResourceChecker<F: ?Sized> {
    fetcher: Arc<F>,
    timeout: Duration,
}

/// `scheme://host[:port]` of a page URL, used as the base for well-known files.
///
/// Falls back to the input without its trailing slash when it does not parse.
pub fn site_root(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(url) if url.has_host() => url.origin().ascii_serialization(),
        _ => page_url.trim_end_matches('/').to_string(),
    }
}

impl<F: Fetcher + ?Sized> SiteResourceChecker<F> {
    pub fn new(fetcher: Arc<F>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub async fn check_sitemap(&self, base_url: &str) -> bool {
        self.well_known_exists(base_url, "sitemap.xml").await
    }

    pub async fn check_robots(&self, base_url: &str) -> bool {
        self.well_known_exists(base_url, "robots.txt").await
    }

    pub async fn check_tls(&self, page_url: &str) -> bool {
        let Some(secure_url) = to_https(page_url) else {
            debug!(page_url, "no https form of URL, TLS not configured");
            return false;
        };

        match self.fetcher.get(&secure_url, self.timeout).await {
            Ok(_) => true,
            Err(e) if e.got_response() => true,
            Err(e) => {
                debug!(url = %secure_url, error = %e, "TLS check failed");
                false
            }
        }
    }

    /// Runs all three checks concurrently. A cancelled token skips the
    /// checks that have not started and reports them as not found.
    pub async fn check_all(
        &self,
        page_url: &str,
        cancel: &CancellationToken,
    ) -> SiteResources {
        if cancel.is_cancelled() {
            return SiteResources::default();
        }

        let root = site_root(page_url);
        let (sitemap_found, robots_found, tls_configured) = tokio::join!(
            self.check_sitemap(&root),
            self.check_robots(&root),
            self.check_tls(page_url),
        );

        SiteResources {
            sitemap_found,
            robots_found,
            tls_configured,
        }
    }

    async fn well_known_exists(&self, base_url: &str, file: &str) -> bool {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), file);
        let found = match self.fetcher.get(&url, self.timeout).await {
            Ok(response) => response.status == 200,
            Err(e) => {
                debug!(url = %url, error = %e, "resource check failed");
                false
            }
        };
        debug!(url = %url, found, "resource check");
        found
    }
}

fn to_https(page_url: &str) -> Option<String> {
    let mut url = Url::parse(page_url).ok()?;
    match url.scheme() {
        "https" => Some(url.into()),
        "http" => {
            url.set_scheme("https").ok()?;
            // An explicit plain-HTTP port will not speak TLS
            if url.port() == Some(80) {
                url.set_port(None).ok()?;
            }
            Some(url.into())
        }
        _ => None,
    }
}
