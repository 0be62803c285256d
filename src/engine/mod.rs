// Fri Oct 16 2026 - Alex

pub mod error;
pub mod pool;
pub mod scheduler;
pub mod task;
pub mod worker;

pub use error::{EngineError, EngineResult};
pub use pool::WorkerPool;
pub use scheduler::{NoopObserver, RunObserver, Scheduler, SchedulerStats};
pub use task::{Completion, FetchTask};
pub use worker::FetchWorker;
