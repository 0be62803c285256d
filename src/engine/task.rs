// Fri Oct 16 2026 - Alex

use crate::film::{AvailabilityResult, CandidateItem};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FetchTask {
    pub item: CandidateItem,
    submitted_at: Instant,
}

impl FetchTask {
    pub fn new(item: CandidateItem) -> Self {
        Self {
            item,
            submitted_at: Instant::now(),
        }
    }

    pub fn queued_for(&self) -> Duration {
        self.submitted_at.elapsed()
    }
}

/// What a worker sends back to the coordinator when a task finishes.
#[derive(Debug, Clone)]
pub struct Completion {
    pub worker_id: usize,
    pub result: AvailabilityResult,
    pub duration: Duration,
}
