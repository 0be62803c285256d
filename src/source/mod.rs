// Fri Oct 16 2026 - Alex

pub mod error;
pub mod letterboxd;
pub mod parse;

pub use error::{SourceError, SourceResult};
pub use letterboxd::LetterboxdSource;

use crate::film::{Availability, CandidateItem};

/// Produces the ranked candidate list for a run.
///
/// Implementations never fail outright: anything that goes wrong is logged and
/// reported as an empty list, which the caller treats as a fatal run condition.
pub trait DiscoverySource {
    fn discover(&self) -> Vec<CandidateItem>;
}

/// Hands out per-lookup sessions. Shared by every fetch worker.
pub trait AvailabilitySource: Send + Sync {
    fn open_session(&self) -> SourceResult<Box<dyn AvailabilitySession>>;
}

/// A single acquired fetch resource. Dropping it releases the resource.
pub trait AvailabilitySession {
    fn lookup(&mut self, item: &CandidateItem) -> SourceResult<Availability>;
}
