// src/analyzer/mod.rs
// =============================================================================
// Ties the fetcher, extractor, probe scheduler and resource checks together
// into one Report.
//
// Shape of an analysis:
//   primary GET (fatal on failure)
//     -> extract signals from the HTML
//     -> fan out: link probes | sitemap/robots/TLS | header HEAD | timed GET
//     -> fan in: build the Report from whatever came back
// =============================================================================

mod engine;
mod progress;

pub use engine::{analyze_url, normalize_url, Analyzer};
