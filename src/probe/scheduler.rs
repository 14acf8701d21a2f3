// src/probe/scheduler.rs
// =============================================================================
// Bounded-concurrency HEAD probing.
//
// How it works:
// 1. Turn every link into a probe future
// 2. Run up to `concurrency` of them at once with buffer_unordered
// 3. Classify each response (OK / Broken / Unreachable)
// 4. Fold the outcomes into a single broken-link count
//
// The fold runs on the stream's consumer side, so the counter has exactly one
// writer no matter how the probes interleave.
//
// A failing probe is just an outcome; it never stops the others.
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::extract::LinkSet;
use crate::fetch::{FetchResult, Fetcher};

/// What a single HEAD probe found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ok,
    /// The server answered with a status >= 400
    Broken(u16),
    /// No usable answer at all (DNS, refused, timeout, TLS, ...)
    Unreachable(String),
}

impl ProbeOutcome {
    fn from_result(result: FetchResult) -> Self {
        match result {
            Ok(response) if response.status >= 400 => ProbeOutcome::Broken(response.status),
            Ok(_) => ProbeOutcome::Ok,
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        }
    }

    /// Broken and unreachable links count the same
    pub fn is_broken(&self) -> bool {
        !matches!(self, ProbeOutcome::Ok)
    }
}

pub struct ProbeScheduler<F: ?Sized> {
    fetcher: Arc<F>,
    concurrency: usize,
    timeout: Duration,
}

impl<F: Fetcher + ?Sized> ProbeScheduler<F> {
    pub fn new(fetcher: Arc<F>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub async fn probe(&self, link: &str) -> ProbeOutcome {
        let outcome = ProbeOutcome::from_result(self.fetcher.head(link, self.timeout).await);
        debug!(link, ?outcome, "probed link");
        outcome
    }

    /// Probes every link and returns how many are broken.
    ///
    /// Once `cancel` fires no new probes are started; probes already in
    /// flight finish, and links never probed are not counted.
    pub async fn probe_all(&self, links: &LinkSet, cancel: &CancellationToken) -> usize {
        let (attempted, broken) = stream::iter(links.iter())
            .take_while(|_| future::ready(!cancel.is_cancelled()))
            .map(|link| self.probe(link))
            .buffer_unordered(self.concurrency)
            .fold((0usize, 0usize), |(attempted, broken), outcome| {
                future::ready((attempted + 1, broken + usize::from(outcome.is_broken())))
            })
            .await;

        debug!(
            total = links.len(),
            attempted,
            broken,
            concurrency = self.concurrency,
            "link probing finished"
        );
        broken
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffer_unordered vs. spawning tasks
//    - buffer_unordered(N) polls at most N futures at a time on the current task
//    - Nothing is spawned, so the probes can borrow `self` and the link set
//    - Results arrive in completion order, which is fine for a count
//
// 2. Why take_while before map?
//    - The stream is pulled lazily: a new link is only taken when a slot frees up
//    - Checking the token there means cancellation stops new probes without
//      touching the ones already running
//
// 3. What is `F: ?Sized`?
//    - It allows `F` to be a trait object such as `dyn Fetcher`
//    - Arc<dyn Fetcher> and Arc<HttpFetcher> both work
// -----------------------------------------------------------------------------
