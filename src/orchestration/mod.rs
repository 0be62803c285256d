// Fri Oct 16 2026 - Alex

pub mod aggregator;
pub mod coordinator;
pub mod error;

pub use aggregator::{Report, ReportSummary, ResultAggregator};
pub use coordinator::DiscoveryCoordinator;
pub use error::RunError;
