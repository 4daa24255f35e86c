//! Worker pool orchestrator
//!
//! Owns a fixed set of worker tasks that pull jobs from a shared channel.
//! Dispatch order is FIFO from the input sequence; completion order is
//! explicitly unordered, so a slow or failing job never holds up the rest.
//! Each worker is wired to the shared log funnel with its own producer id
//! before it takes its first job. The pool only returns once every worker
//! has drained the channel and been joined, so no job is abandoned
//! mid-flight on the normal shutdown path.

use crate::logsink::LogSender;
use crate::HarvestError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Result of one job, tagged with its position in the input sequence
#[derive(Debug)]
pub struct JobOutcome<T, E> {
    /// Index of the job in the submitted sequence
    pub index: usize,

    /// What the job produced
    pub result: Result<T, E>,
}

/// Returns the default worker count: twice the available parallelism
pub fn default_workers() -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    parallelism * 2
}

/// Bounded pool of worker tasks executing jobs from a shared queue
pub struct WorkerPool {
    workers: usize,
    log: LogSender,
}

impl WorkerPool {
    /// Creates a pool with the given worker count; 0 selects the default
    pub fn new(workers: usize, log: &LogSender) -> Self {
        let workers = if workers == 0 {
            default_workers()
        } else {
            workers
        };
        Self {
            workers,
            log: log.for_producer("pool"),
        }
    }

    /// The number of worker tasks this pool runs
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every item through `job` and collects all outcomes
    ///
    /// Items are queued FIFO; workers pull from the shared queue until it is
    /// empty. A job returning `Err` is an ordinary outcome; only a panicked
    /// worker task is an orchestration fault and aborts the run.
    ///
    /// The returned outcomes are in completion order, not submission order;
    /// callers that need input order can sort by `JobOutcome::index`.
    pub async fn run<I, T, E, F, Fut>(
        &self,
        items: Vec<I>,
        job: F,
    ) -> Result<Vec<JobOutcome<T, E>>, HarvestError>
    where
        I: Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        F: Fn(I, LogSender) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let workers = self.workers.min(total);

        // Queue every job up front; dropping the sender closes the intake,
        // which is what lets workers terminate once the queue runs dry.
        let (job_tx, job_rx) = mpsc::unbounded_channel::<(usize, I)>();
        for (index, item) in items.into_iter().enumerate() {
            if job_tx.send((index, item)).is_err() {
                break;
            }
        }
        drop(job_tx);

        self.log.debug(format!(
            "dispatching {} jobs across {} workers",
            total, workers
        ));

        let job_rx = Arc::new(Mutex::new(job_rx));
        let job = Arc::new(job);

        let mut join_set = JoinSet::new();
        for slot in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let job = Arc::clone(&job);
            let worker_log = self.log.for_producer(format!("worker-{}", slot));

            join_set.spawn(async move {
                let mut outcomes = Vec::new();
                loop {
                    // Hold the receiver lock only long enough to take the
                    // next job, never across job execution.
                    let next = { job_rx.lock().await.recv().await };
                    let (index, item) = match next {
                        Some(job_item) => job_item,
                        None => break,
                    };
                    let result = (*job)(item, worker_log.clone()).await;
                    outcomes.push(JobOutcome { index, result });
                }
                outcomes
            });
        }

        // Collect workers as they finish, in whatever order that happens.
        let mut all = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(outcomes) => all.extend(outcomes),
                Err(e) => {
                    return Err(HarvestError::Pool(format!("worker task failed: {}", e)));
                }
            }
        }

        self.log.debug(format!("drained {} job outcomes", all.len()));
        Ok(all)
    }
}
