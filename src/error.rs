// src/error.rs
// =============================================================================
// Error types for the analysis engine.
//
// Only two things can stop an analysis:
// - The primary page could not be fetched (FetchError)
// - The caller cancelled it
//
// Every other failure (a dead link, a missing sitemap, no TLS) is folded into
// a fallback value inside the Report and never shows up here.
// =============================================================================

use thiserror::Error;

/// Why a single GET or HEAD request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("TLS error for {url}: {reason}")]
    Tls { url: String, reason: String },

    /// The server answered, but with a non-2xx status (GET only)
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

impl FetchError {
    /// True when the server produced a response, whatever its status.
    pub fn got_response(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Connect { url, .. }
            | FetchError::Tls { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Request { url, .. } => url,
        }
    }
}

/// Errors surfaced to whoever called the analyzer.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The primary page fetch failed; nothing else was attempted
    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors from saving or loading a report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
