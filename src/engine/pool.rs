// Fri Oct 16 2026 - Alex

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::task::{Completion, FetchTask};
use crate::engine::worker::FetchWorker;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

struct TaskQueue {
    tasks: VecDeque<FetchTask>,
    closed: bool,
}

struct Shared {
    queue: Mutex<TaskQueue>,
    available: Condvar,
}

/// Fixed set of worker threads draining a FIFO task queue.
///
/// At most `size` fetches are in flight at once. Each finished task is sent on
/// the completion channel in whatever order it finishes.
pub struct WorkerPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(size: usize, worker: FetchWorker, completions: Sender<Completion>) -> EngineResult<Self> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(TaskQueue {
                tasks: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            handles: Vec::with_capacity(size.max(1)),
        };

        for id in 0..size.max(1) {
            let shared = pool.shared.clone();
            let worker = worker.clone();
            let completions = completions.clone();

            let handle = thread::Builder::new()
                .name(format!("fetch-worker-{}", id))
                .spawn(move || worker_loop(id, shared, worker, completions))
                .map_err(|source| EngineError::Spawn { id, source })?;

            pool.handles.push(handle);
        }

        log::debug!("Started {} fetch workers", pool.handles.len());
        Ok(pool)
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    pub fn submit(&self, task: FetchTask) {
        self.shared.queue.lock().tasks.push_back(task);
        self.shared.available.notify_one();
    }

    /// No more tasks will be submitted; workers exit once the queue is drained.
    pub fn close(&self) {
        self.shared.queue.lock().closed = true;
        self.shared.available.notify_all();
    }

    pub fn join(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.close();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                log::warn!("A fetch worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

fn next_task(shared: &Shared) -> Option<FetchTask> {
    let mut queue = shared.queue.lock();
    loop {
        if let Some(task) = queue.tasks.pop_front() {
            return Some(task);
        }
        if queue.closed {
            return None;
        }
        shared.available.wait(&mut queue);
    }
}

fn worker_loop(id: usize, shared: Arc<Shared>, worker: FetchWorker, completions: Sender<Completion>) {
    while let Some(task) = next_task(&shared) {
        log::trace!(
            "Worker {} picked up {} after {:?} in queue",
            id,
            task.item.identity,
            task.queued_for()
        );

        let start = Instant::now();
        let result = worker.fetch(&task.item);
        let completion = Completion {
            worker_id: id,
            result,
            duration: start.elapsed(),
        };

        if completions.send(completion).is_err() {
            log::debug!("Worker {} stopping, coordinator went away", id);
            break;
        }
    }

    log::trace!("Worker {} exiting", id);
}
