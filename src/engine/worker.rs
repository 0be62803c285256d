// Fri Oct 16 2026 - Alex

use crate::film::{Availability, AvailabilityResult, CandidateItem};
use crate::source::{AvailabilitySource, SourceResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Looks up one film at a time. Never fails: every problem comes back as
/// [`Availability::Failed`] inside the result.
#[derive(Clone)]
pub struct FetchWorker {
    source: Arc<dyn AvailabilitySource>,
}

impl FetchWorker {
    pub fn new(source: Arc<dyn AvailabilitySource>) -> Self {
        Self { source }
    }

    pub fn fetch(&self, item: &CandidateItem) -> AvailabilityResult {
        let availability = match panic::catch_unwind(AssertUnwindSafe(|| self.lookup(item))) {
            Ok(Ok(availability)) => availability,
            Ok(Err(e)) => {
                log::debug!("Lookup failed for {}: {}", item.identity, e);
                Availability::failed(e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::warn!("Lookup panicked for {}: {}", item.identity, message);
                Availability::failed(format!("worker panicked: {}", message))
            }
        };

        AvailabilityResult::fetched(item, availability)
    }

    // The session lives only inside this call; unwinding drops it as well.
    fn lookup(&self, item: &CandidateItem) -> SourceResult<Availability> {
        let mut session = self.source.open_session()?;
        session.lookup(item)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
