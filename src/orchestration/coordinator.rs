// Fri Oct 16 2026 - Alex

use crate::cache::CacheStore;
use crate::config::Config;
use crate::engine::{NoopObserver, RunObserver, Scheduler};
use crate::film::CandidateItem;
use crate::orchestration::aggregator::{Report, ResultAggregator};
use crate::orchestration::error::RunError;
use crate::source::{DiscoverySource, LetterboxdSource};
use std::sync::Arc;

/// Drives one discover -> fetch -> assemble run.
pub struct DiscoveryCoordinator {
    discovery: Arc<dyn DiscoverySource>,
    scheduler: Scheduler,
    aggregator: ResultAggregator,
}

impl DiscoveryCoordinator {
    pub fn new(discovery: Arc<dyn DiscoverySource>, scheduler: Scheduler) -> Self {
        Self {
            discovery,
            scheduler,
            aggregator: ResultAggregator::new(),
        }
    }

    /// Wires both sources to Letterboxd. Fails if the HTTP client cannot be built.
    pub fn letterboxd(config: &Config, cache: CacheStore) -> Result<Self, RunError> {
        let source = Arc::new(LetterboxdSource::new(config)?);
        let scheduler = Scheduler::new(cache, source.clone(), config.max_concurrency);
        Ok(Self::new(source, scheduler))
    }

    pub fn discover(&self) -> Result<Vec<CandidateItem>, RunError> {
        let items = self.discovery.discover();
        if items.is_empty() {
            return Err(RunError::NoCandidates);
        }

        log::info!("Discovered {} candidate films", items.len());
        Ok(items)
    }

    pub fn fetch(&mut self, items: &[CandidateItem], observer: &dyn RunObserver) -> Result<Report, RunError> {
        let results = self.scheduler.run_with(items, observer)?;
        Ok(self.aggregator.assemble(results))
    }

    pub fn run(&mut self) -> Result<Report, RunError> {
        self.run_with(&NoopObserver)
    }

    pub fn run_with(&mut self, observer: &dyn RunObserver) -> Result<Report, RunError> {
        let items = self.discover()?;
        self.fetch(&items, observer)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
