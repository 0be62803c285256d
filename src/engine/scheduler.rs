// Fri Oct 16 2026 - Alex

use crate::cache::{CacheEntry, CacheStore};
use crate::engine::error::EngineResult;
use crate::engine::pool::WorkerPool;
use crate::engine::task::FetchTask;
use crate::engine::worker::FetchWorker;
use crate::film::{Availability, AvailabilityResult, CandidateItem};
use crate::source::AvailabilitySource;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::channel;
use std::sync::Arc;

/// Hooks for reporting progress while a batch runs. Called on the coordinator thread.
pub trait RunObserver {
    fn on_cache_hit(&self, _result: &AvailabilityResult) {}

    fn on_dispatch(&self, _item: &CandidateItem) {}

    fn on_fetched(&self, _result: &AvailabilityResult, _cached: bool) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Bounded fan-out of availability lookups with a write-through cache.
///
/// The scheduler owns the [`CacheStore`] for the whole run. Cache reads happen
/// before anything is dispatched and cache writes happen here as completions
/// arrive, so workers never touch the cache and writes are strictly one at a time.
pub struct Scheduler {
    cache: CacheStore,
    source: Arc<dyn AvailabilitySource>,
    max_concurrency: usize,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new(cache: CacheStore, source: Arc<dyn AvailabilitySource>, max_concurrency: usize) -> Self {
        Self {
            cache,
            source,
            max_concurrency: max_concurrency.max(1),
            stats: SchedulerStats::new(),
        }
    }

    pub fn run(&mut self, items: &[CandidateItem]) -> EngineResult<Vec<AvailabilityResult>> {
        self.run_with(items, &NoopObserver)
    }

    /// Returns exactly one result per input item, in completion order.
    pub fn run_with(
        &mut self,
        items: &[CandidateItem],
        observer: &dyn RunObserver,
    ) -> EngineResult<Vec<AvailabilityResult>> {
        self.stats = SchedulerStats::new();
        self.stats.total_items = items.len();

        let mut results: Vec<AvailabilityResult> = Vec::with_capacity(items.len());
        let mut by_identity: HashMap<String, usize> = HashMap::new();
        let mut duplicates: Vec<&CandidateItem> = Vec::new();
        let mut to_fetch: Vec<&CandidateItem> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for item in items {
            if !seen.insert(item.identity.as_str()) {
                duplicates.push(item);
                continue;
            }

            match self.cache.get(&item.identity) {
                Some(entry) => {
                    let result = entry.to_result(item);
                    observer.on_cache_hit(&result);
                    self.stats.cache_hits += 1;
                    by_identity.insert(item.identity.clone(), results.len());
                    results.push(result);
                }
                None => to_fetch.push(item),
            }
        }

        if !to_fetch.is_empty() {
            for result in self.dispatch(&to_fetch, observer)? {
                by_identity.insert(result.identity.clone(), results.len());
                results.push(result);
            }
        }

        for item in duplicates {
            self.stats.duplicates += 1;
            let copy = match by_identity.get(&item.identity) {
                Some(&index) => results[index].for_item(item),
                None => {
                    self.stats.failed += 1;
                    AvailabilityResult::fetched(item, Availability::failed("no outcome for duplicate entry"))
                }
            };

            if copy.served_from_cache {
                observer.on_cache_hit(&copy);
            } else {
                observer.on_fetched(&copy, copy.is_cacheable());
            }
            results.push(copy);
        }

        log::info!(
            "Batch done: {} items, {} from cache, {} fetched, {} failed",
            self.stats.total_items,
            self.stats.cache_hits,
            self.stats.dispatched,
            self.stats.failed
        );

        Ok(results)
    }

    fn dispatch(
        &mut self,
        to_fetch: &[&CandidateItem],
        observer: &dyn RunObserver,
    ) -> EngineResult<Vec<AvailabilityResult>> {
        let (tx, rx) = channel();
        let size = self.max_concurrency.min(to_fetch.len());
        let pool = WorkerPool::new(size, FetchWorker::new(self.source.clone()), tx)?;

        let mut outstanding: HashMap<&str, &CandidateItem> = HashMap::with_capacity(to_fetch.len());
        for item in to_fetch {
            observer.on_dispatch(item);
            outstanding.insert(item.identity.as_str(), *item);
            pool.submit(FetchTask::new((*item).clone()));
            self.stats.dispatched += 1;
        }
        pool.close();

        let mut results = Vec::with_capacity(to_fetch.len());
        while !outstanding.is_empty() {
            let completion = match rx.recv() {
                Ok(completion) => completion,
                Err(_) => break,
            };

            if outstanding.remove(completion.result.identity.as_str()).is_none() {
                log::warn!("Ignoring unexpected completion for {}", completion.result.identity);
                continue;
            }

            log::debug!(
                "Worker {} finished {} in {:?}",
                completion.worker_id,
                completion.result.identity,
                completion.duration
            );

            let cached = self.record(&completion.result);
            observer.on_fetched(&completion.result, cached);
            results.push(completion.result);
        }

        // Only reachable if every worker died without reporting back.
        let mut lost: Vec<&CandidateItem> = outstanding.into_values().collect();
        lost.sort_by_key(|item| item.ordinal);
        for item in lost {
            let result = AvailabilityResult::fetched(item, Availability::failed("worker pool terminated"));
            self.stats.failed += 1;
            observer.on_fetched(&result, false);
            results.push(result);
        }

        pool.join();
        Ok(results)
    }

    /// Writes a fresh positive finding through to the cache. Returns whether it was cached.
    fn record(&mut self, result: &AvailabilityResult) -> bool {
        if result.availability.is_failed() {
            self.stats.failed += 1;
        }

        let Some(entry) = CacheEntry::from_result(result) else {
            return false;
        };

        if let Err(e) = self.cache.put(&result.identity, entry) {
            log::warn!("Could not save cache: {}", e);
            self.stats.persist_failures += 1;
        }
        self.stats.cache_writes += 1;
        true
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn into_cache(self) -> CacheStore {
        self.cache
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub total_items: usize,
    pub cache_hits: usize,
    pub dispatched: usize,
    pub failed: usize,
    pub cache_writes: usize,
    pub persist_failures: usize,
    pub duplicates: usize,
}

impl SchedulerStats {
    pub fn new() -> Self {
        Self::default()
    }
}
