// src/probe/mod.rs
// =============================================================================
// Liveness probing for the outbound links found on a page.
//
// Each link gets one HEAD request. Probes run concurrently up to a fixed
// limit and only the number of broken links is kept.
// =============================================================================

mod scheduler;

pub use scheduler::{ProbeOutcome, ProbeScheduler};
