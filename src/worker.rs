//! Waiting for jobs of the job engine to finish
//!
//! Exports can only start once a job is complete. Every job runs on its own
//! thread and reports its [`JobResult`] through a channel, so callers block
//! on the result instead of polling a flag.
//!
//! ```
//! use revigo_export::{JobQueue, JobResult};
//!
//! let mut queue = JobQueue::new();
//! queue.spawn(1, || Ok(JobResult::new(1, 0.7))).unwrap();
//! queue.spawn(2, || Ok(JobResult::new(2, 0.4))).unwrap();
//!
//! let mut finished: Vec<u32> = queue
//!     .wait_all()
//!     .into_iter()
//!     .map(|result| result.unwrap().id())
//!     .collect();
//! finished.sort_unstable();
//! assert_eq!(finished, vec![1, 2]);
//! ```
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::job::JobResult;
use crate::{ReduceError, ReduceResult};

/// Runs `job` and converts a panic into [`ReduceError::JobFailed`]
fn run_job<F>(id: u32, job: F) -> ReduceResult<JobResult>
where
    F: FnOnce() -> ReduceResult<JobResult>,
{
    let start = Instant::now();
    let result = match catch_unwind(AssertUnwindSafe(job)) {
        Ok(result) => result,
        Err(_) => Err(ReduceError::JobFailed {
            job: id,
            reason: "the job panicked".to_string(),
        }),
    };
    let elapsed = start.elapsed();
    match result {
        Ok(result) => {
            info!(
                "Job {} has finished processing the data in {:.3} seconds",
                id,
                elapsed.as_secs_f64()
            );
            Ok(result.with_execution_time(elapsed))
        }
        Err(err) => {
            warn!("Job {} failed after {:.3} seconds: {}", id, elapsed.as_secs_f64(), err);
            Err(err)
        }
    }
}

fn spawn_thread<F>(id: u32, body: F) -> ReduceResult<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    debug!("Starting job {}", id);
    Ok(thread::Builder::new()
        .name(format!("job-{id}"))
        .spawn(body)?)
}

/// A single running job
pub struct JobHandle {
    id: u32,
    receiver: Receiver<ReduceResult<JobResult>>,
    thread: Option<JoinHandle<()>>,
}

impl JobHandle {
    /// Runs `job` on a new thread
    ///
    /// # Errors
    ///
    /// If the thread cannot be started: [`ReduceError::Io`]
    pub fn spawn<F>(id: u32, job: F) -> ReduceResult<Self>
    where
        F: FnOnce() -> ReduceResult<JobResult> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let thread = spawn_thread(id, move || {
            // the handle might have been dropped already
            let _ = sender.send(run_job(id, job));
        })?;
        Ok(Self {
            id,
            receiver,
            thread: Some(thread),
        })
    }

    /// The ID of the job
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Blocks until the job is finished and returns its result
    ///
    /// # Errors
    ///
    /// - The job returned an error
    /// - The job panicked or its result was already taken by
    ///   [`JobHandle::wait_timeout`]: [`ReduceError::JobFailed`]
    pub fn wait(mut self) -> ReduceResult<JobResult> {
        let result = self.receiver.recv().map_err(|_| ReduceError::JobFailed {
            job: self.id,
            reason: "no result available".to_string(),
        });
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Worker thread of job {} did not shut down cleanly", self.id);
            }
        }
        result?
    }

    /// Waits at most `timeout` for the job to finish
    ///
    /// Returns `None` if the job is still running. Cancelling the job
    /// is up to the job engine.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<ReduceResult<JobResult>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(ReduceError::JobFailed {
                job: self.id,
                reason: "no result available".to_string(),
            })),
        }
    }
}

/// Runs several jobs in parallel and collects their results
pub struct JobQueue {
    sender: Sender<ReduceResult<JobResult>>,
    receiver: Receiver<ReduceResult<JobResult>>,
    pending: usize,
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue {
    /// Constructs an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Runs `job` on a new thread
    ///
    /// # Errors
    ///
    /// If the thread cannot be started: [`ReduceError::Io`]
    pub fn spawn<F>(&mut self, id: u32, job: F) -> ReduceResult<()>
    where
        F: FnOnce() -> ReduceResult<JobResult> + Send + 'static,
    {
        let sender = self.sender.clone();
        spawn_thread(id, move || {
            // `run_job` never panics, so every job reports exactly once
            let _ = sender.send(run_job(id, job));
        })?;
        self.pending += 1;
        Ok(())
    }

    /// Number of jobs that did not report their result yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Blocks until the next job finishes and returns its result
    ///
    /// Returns `None` once all jobs have reported.
    pub fn next_finished(&mut self) -> Option<ReduceResult<JobResult>> {
        if self.pending == 0 {
            return None;
        }
        // `self.sender` keeps the channel open, so `recv` only fails
        // if this queue is broken
        let result = self.receiver.recv().ok()?;
        self.pending -= 1;
        Some(result)
    }

    /// Blocks until all jobs are finished and returns the results
    /// in the order the jobs finished
    pub fn wait_all(mut self) -> Vec<ReduceResult<JobResult>> {
        let mut results = Vec::with_capacity(self.pending);
        while let Some(result) = self.next_finished() {
            results.push(result);
        }
        results
    }
}
