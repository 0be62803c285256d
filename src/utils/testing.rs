// Fri Oct 16 2026 - Alex

//! Scripted sources for exercising the pipeline without the network.

use crate::film::{Availability, CandidateItem};
use crate::source::{AvailabilitySession, AvailabilitySource, DiscoverySource, SourceError, SourceResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;

/// `film-1` .. `film-n`, ranked in order.
pub fn candidate_items(n: usize) -> Vec<CandidateItem> {
    (1..=n)
        .map(|i| CandidateItem::new(&format!("film-{}", i), &format!("Film {}", i), i))
        .collect()
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Found(&'static str),
    NoInfo,
    Fail(&'static str),
    Panic,
}

#[derive(Default)]
struct ScriptedState {
    outcomes: HashMap<String, Outcome>,
    latency: Duration,
    failing_sessions: bool,
    lookups: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    sessions_opened: AtomicUsize,
    open_sessions: AtomicUsize,
}

/// Availability source with per-identity outcomes. Anything unscripted is found on Netflix.
pub struct ScriptedSource {
    state: Arc<ScriptedState>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            state: Arc::new(ScriptedState::default()),
        }
    }

    fn state_mut(&mut self) -> &mut ScriptedState {
        Arc::get_mut(&mut self.state).expect("configure before sharing")
    }

    pub fn with_outcome(mut self, identity: &str, outcome: Outcome) -> Self {
        self.state_mut().outcomes.insert(identity.to_string(), outcome);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.state_mut().latency = latency;
        self
    }

    pub fn with_failing_sessions(mut self) -> Self {
        self.state_mut().failing_sessions = true;
        self
    }

    pub fn shared(&self) -> Arc<dyn AvailabilitySource> {
        Arc::new(ScriptedSource {
            state: self.state.clone(),
        })
    }

    pub fn lookups_for(&self, identity: &str) -> usize {
        self.state.lookups.lock().get(identity).copied().unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.state.lookups.lock().values().sum()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.state.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn open_sessions(&self) -> usize {
        self.state.open_sessions.load(Ordering::SeqCst)
    }
}

impl AvailabilitySource for ScriptedSource {
    fn open_session(&self) -> SourceResult<Box<dyn AvailabilitySession>> {
        if self.state.failing_sessions {
            return Err(SourceError::Init("scripted session failure".to_string()));
        }

        self.state.sessions_opened.fetch_add(1, Ordering::SeqCst);
        self.state.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            state: self.state.clone(),
        }))
    }
}

struct ScriptedSession {
    state: Arc<ScriptedState>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AvailabilitySession for ScriptedSession {
    fn lookup(&mut self, item: &CandidateItem) -> SourceResult<Availability> {
        *self.state.lookups.lock().entry(item.identity.clone()).or_default() += 1;

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.state.in_flight);

        if !self.state.latency.is_zero() {
            thread::sleep(self.state.latency);
        }

        match self.state.outcomes.get(&item.identity) {
            None => Ok(Availability::Listed("Netflix".to_string())),
            Some(Outcome::Found(services)) => Ok(Availability::Listed(services.to_string())),
            Some(Outcome::NoInfo) => Ok(Availability::Unavailable),
            Some(Outcome::Fail(detail)) => Err(SourceError::Parse(detail.to_string())),
            Some(Outcome::Panic) => panic!("scripted panic for {}", item.identity),
        }
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.state.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Discovery that always returns the same listing.
pub struct StaticDiscovery(pub Vec<CandidateItem>);

impl DiscoverySource for StaticDiscovery {
    fn discover(&self) -> Vec<CandidateItem> {
        self.0.clone()
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records log lines per thread so parallel tests don't see each other's output.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|lines| lines.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Runs `f` and returns what it logged on the current thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INSTALL_LOGGER.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    CAPTURED.with(|lines| lines.borrow_mut().clear());
    let result = f();
    let lines = CAPTURED.with(|lines| std::mem::take(&mut *lines.borrow_mut()));
    (result, lines)
}
