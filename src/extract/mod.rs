// src/extract/mod.rs
// =============================================================================
// Pulls the on-page SEO signals out of an HTML document.
//
// This is a pure step: no I/O, no errors. Broken or partial HTML is parsed
// leniently and simply yields fewer signals.
// =============================================================================

mod html;

pub use html::{
    extract_page_signals, LinkSet, PageSignals, NO_CANONICAL, NO_META_DESCRIPTION, NO_TITLE,
};
