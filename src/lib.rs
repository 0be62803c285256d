// Fri Oct 16 2026 - Alex

pub mod cache;
pub mod config;
pub mod engine;
pub mod film;
pub mod orchestration;
pub mod output;
pub mod source;
pub mod ui;
pub mod utils;

pub use cache::{CacheEntry, CacheStore};
pub use config::Config;
pub use engine::Scheduler;
pub use film::{Availability, AvailabilityResult, CandidateItem};
pub use orchestration::{DiscoveryCoordinator, Report, ResultAggregator, RunError};
pub use output::ReportGenerator;
pub use source::{AvailabilitySource, DiscoverySource, LetterboxdSource};
