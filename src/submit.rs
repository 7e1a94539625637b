//! Simulated asynchronous submission.
//!
//! Stands in for the payment gateway / invitation delivery the real product
//! would call. Route handlers await it before advancing the wizard, so the
//! progression controller itself never suspends.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Sleeps for a random duration below the configured cap.
#[derive(Debug, Clone)]
pub struct SampleSubmission {
    cap: Duration,
}

impl SampleSubmission {
    pub fn new(cap: Duration) -> Self {
        Self { cap }
    }

    /// An instant submission, for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Simulate one submission round-trip.
    pub async fn run(&self) {
        let cap_ms = self.cap.as_millis() as u64;
        if cap_ms == 0 {
            return;
        }
        let millis = rand::thread_rng().gen_range(0..cap_ms);
        debug!(millis, "Simulating submission");
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
