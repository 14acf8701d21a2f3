// src/fetch/http.rs
// =============================================================================
// The reqwest-backed Fetcher.
//
// One Client is built up front and shared by every request of an analysis,
// so connections and TLS sessions get reused across the concurrent probes.
//
// Failures are sorted into the FetchError variants by looking at what
// reqwest tells us (timeout flag, connect flag, certificate/TLS wording).
// =============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::collections::BTreeMap;
use std::error::Error as _;
use std::time::{Duration, Instant};
use url::Url;

use super::{FetchResponse, FetchResult, Fetcher};
use crate::error::FetchError;

// Follow up to 5 redirects, same as a browser would before giving up
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, method: Method, url: &str, timeout: Duration) -> FetchResult {
        // reqwest would only complain about a bad URL at send time with a
        // vague builder error; catch it here with a clear reason instead
        Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let start = Instant::now();
        let response = self
            .client
            .request(method.clone(), url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if method == Method::GET && !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = flatten_headers(response.headers());
        let body = if method == Method::HEAD {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|e| categorize_error(url, e))?
        };

        Ok(FetchResponse {
            status: status.as_u16(),
            headers,
            body,
            elapsed: start.elapsed(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult {
        self.send(Method::GET, url, timeout).await
    }

    async fn head(&self, url: &str, timeout: Duration) -> FetchResult {
        self.send(Method::HEAD, url, timeout).await
    }
}

// Repeated headers (e.g. several Set-Cookie lines) are joined with ", "
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    flat
}

// reqwest's top-level message is usually just "error sending request for
// url (...)"; the interesting part (certificate, DNS, ...) sits further down
// the chain. Only the causes are searched so the URL itself can't match.
fn source_chain_text(error: &reqwest::Error) -> String {
    let mut causes = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes.join(": ")
}

fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    let causes = source_chain_text(&error);
    let lowered = causes.to_lowercase();
    let reason = if causes.is_empty() {
        error.to_string()
    } else {
        format!("{}: {}", error, causes)
    };

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl")
    {
        // TLS handshake failures are reported as connect errors too, so
        // this has to be checked first
        FetchError::Tls { url, reason }
    } else if error.is_connect() {
        FetchError::Connect { url, reason }
    } else {
        FetchError::Request { url, reason }
    }
}
