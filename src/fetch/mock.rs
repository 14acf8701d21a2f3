// src/fetch/mock.rs
// =============================================================================
// A scripted Fetcher for tests.
//
// Routes are registered per (verb, url). Unregistered URLs fail as if the
// host refused the connection. Every call is recorded so tests can assert on
// what was (or was not) requested, a token can be cancelled partway
// through a run, and the peak number of concurrent calls is
// tracked to verify concurrency limits.
// =============================================================================

use async_trait::async_trait;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{FetchResponse, FetchResult, Fetcher};
use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Head,
}

#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with this body
    Page(String),
    Status(u16),
    Timeout,
    TlsFailure,
}

#[derive(Default)]
pub struct MockFetcher {
    routes: HashMap<(Verb, String), MockReply>,
    max_jitter_ms: u64,
    calls: Mutex<Vec<(Verb, String)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    cancel_on_head: Option<(usize, CancellationToken)>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, verb: Verb, url: &str, reply: MockReply) -> Self {
        self.routes.insert((verb, url.to_string()), reply);
        self
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.route(Verb::Get, url, MockReply::Page(html.to_string()))
    }

    pub fn head_status(self, url: &str, status: u16) -> Self {
        self.route(Verb::Head, url, MockReply::Status(status))
    }

    /// Each call sleeps a random 0..=max_ms before answering
    pub fn with_jitter(mut self, max_ms: u64) -> Self {
        self.max_jitter_ms = max_ms;
        self
    }

    /// Cancels `token` when the n-th HEAD request (1-based) arrives
    pub fn cancel_on_head(mut self, n: usize, token: &CancellationToken) -> Self {
        self.cancel_on_head = Some((n, token.clone()));
        self
    }

    pub fn calls(&self) -> Vec<(Verb, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, verb: Verb) -> usize {
        self.calls().iter().filter(|(v, _)| *v == verb).count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, verb: Verb, url: &str) -> FetchResult {
        let heads_so_far = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((verb, url.to_string()));
            calls.iter().filter(|(v, _)| *v == Verb::Head).count()
        };
        if let Some((n, token)) = &self.cancel_on_head {
            if verb == Verb::Head && heads_so_far == *n {
                token.cancel();
            }
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.max_jitter_ms > 0 {
            let delay = rand::rng().random_range(0..=self.max_jitter_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let result = self.reply_for(verb, url);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn reply_for(&self, verb: Verb, url: &str) -> FetchResult {
        let url_owned = url.to_string();
        let response = |status: u16, body: String| FetchResponse {
            status,
            headers: BTreeMap::from([("server".to_string(), "mock".to_string())]),
            body,
            elapsed: Duration::from_millis(5),
        };

        match self.routes.get(&(verb, url_owned.clone())) {
            None => Err(FetchError::Connect {
                url: url_owned,
                reason: "connection refused".to_string(),
            }),
            Some(MockReply::Timeout) => Err(FetchError::Timeout { url: url_owned }),
            Some(MockReply::TlsFailure) => Err(FetchError::Tls {
                url: url_owned,
                reason: "invalid peer certificate".to_string(),
            }),
            Some(MockReply::Page(body)) => Ok(response(
                200,
                if verb == Verb::Head { String::new() } else { body.clone() },
            )),
            Some(MockReply::Status(status)) => {
                if verb == Verb::Get && !(200..300).contains(status) {
                    Err(FetchError::Status {
                        url: url_owned,
                        status: *status,
                    })
                } else {
                    Ok(response(*status, String::new()))
                }
            }
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &str, _timeout: Duration) -> FetchResult {
        self.answer(Verb::Get, url).await
    }

    async fn head(&self, url: &str, _timeout: Duration) -> FetchResult {
        self.answer(Verb::Head, url).await
    }
}
