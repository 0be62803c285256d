// Fri Oct 16 2026 - Alex

use crate::film::AvailabilityResult;

/// Restores discovery order over a set of results collected in completion order.
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, mut results: Vec<AvailabilityResult>) -> Report {
        results.sort_by_key(|r| r.ordinal);
        let summary = ReportSummary::from_results(&results);

        Report {
            entries: results,
            summary,
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub from_cache: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl ReportSummary {
    fn from_results(results: &[AvailabilityResult]) -> Self {
        let from_cache = results.iter().filter(|r| r.served_from_cache).count();
        let failed = results.iter().filter(|r| r.availability.is_failed()).count();

        Self {
            total: results.len(),
            from_cache,
            fetched: results.len() - from_cache,
            failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<AvailabilityResult>,
    pub summary: ReportSummary,
}
