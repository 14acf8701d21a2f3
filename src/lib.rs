// src/lib.rs
// =============================================================================
// seo-probe: fetch one page and report its basic on-page SEO signals.
//
// Modules (leaves first):
// - fetch:     GET/HEAD requests with per-call timeouts
// - extract:   title, meta description, canonical, images, outbound links
// - probe:     bounded-concurrency HEAD probes for outbound links
// - resources: sitemap.xml, robots.txt and TLS checks
// - analyzer:  runs all of the above and builds the Report
// - report:    the Report value and its JSON save format
//
// The binary in main.rs is only a shell around `Analyzer::analyze`.
// =============================================================================

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod probe;
pub mod report;
pub mod resources;

pub use analyzer::{analyze_url, Analyzer};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, FetchError, ReportError};
pub use report::Report;
