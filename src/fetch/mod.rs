// src/fetch/mod.rs
// =============================================================================
// This module issues the raw GET and HEAD requests for an analysis.
//
// Submodules:
// - http: the real implementation on top of reqwest
// - mock: a scripted in-memory fetcher used by the tests
//
// Everything above this layer talks to the `Fetcher` trait, so the probe
// scheduler and analyzer can be driven without a network.
// =============================================================================

mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    /// Response body as text (always empty for HEAD)
    pub body: String,
    pub elapsed: Duration,
}

pub type FetchResult = Result<FetchResponse, FetchError>;

/// Issues single-shot requests. Implementations never retry.
///
/// `get` treats any non-2xx status as `FetchError::Status`.
/// `head` returns whatever status the server sent; deciding whether that
/// status is "broken" is the caller's job.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult;

    async fn head(&self, url: &str, timeout: Duration) -> FetchResult;
}
