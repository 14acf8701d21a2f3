// src/resources/mod.rs
// =============================================================================
// Site-wide resource checks: sitemap.xml, robots.txt and TLS availability.
//
// Each check answers a yes/no question and turns every failure into "no".
// =============================================================================

mod checks;

pub use checks::{site_root, SiteResourceChecker, SiteResources};
