//! Background execution of network jobs
//!
//! Jobs run off the UI thread and report back as a [`Completion`] over an
//! mpsc channel. The UI thread drains the channel and applies each
//! completion to its own target.

use crate::api::RecipeError;
use crate::models::{RecipeDetail, RecipeSummary};
use crate::render::ContainerId;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::fmt;

/// A unit of background work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Executes jobs
pub trait TaskRunner: Send + Sync {
    fn spawn(&self, job: Job);
}

/// Worker count for [`PoolRunner::with_default_threads`]
///
/// Jobs spend their time waiting on the network, so this is independent of
/// the number of cores.
pub const NETWORK_THREADS: usize = 8;

/// Runs jobs on a dedicated rayon pool
///
/// The pool is separate from rayon's global pool so blocking requests never
/// occupy the threads CPU-bound work relies on.
pub struct PoolRunner {
    pool: ThreadPool,
}

impl PoolRunner {
    /// Build a runner with `threads` workers
    ///
    /// # Errors
    ///
    /// Returns `ThreadPoolBuildError` if the worker threads cannot be started.
    pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("recipebox-net-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Build a runner with [`NETWORK_THREADS`] workers
    ///
    /// # Errors
    ///
    /// Returns `ThreadPoolBuildError` if the worker threads cannot be started.
    pub fn with_default_threads() -> Result<Self, ThreadPoolBuildError> {
        Self::new(NETWORK_THREADS)
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl fmt::Debug for PoolRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRunner")
            .field("threads", &self.threads())
            .finish()
    }
}

impl TaskRunner for PoolRunner {
    fn spawn(&self, job: Job) {
        self.pool.spawn(job);
    }
}

/// Runs jobs synchronously on the calling thread
///
/// Completions are queued on the channel before `spawn` returns, so a
/// following `pump` sees them.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineRunner;

impl TaskRunner for InlineRunner {
    fn spawn(&self, job: Job) {
        job();
    }
}

/// Where a completion is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Container(ContainerId),
    Modal,
}

/// Result of a finished job
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A search settled
    Recipes(Result<Vec<RecipeSummary>, RecipeError>),
    /// A favorites lookup settled; `requested` ids were asked for
    Favorites {
        found: Vec<RecipeDetail>,
        requested: usize,
    },
    /// A detail lookup for `id` settled
    Detail {
        id: String,
        result: Result<RecipeDetail, RecipeError>,
    },
}

/// A settled job and the target it belongs to
#[derive(Debug, Clone)]
pub struct Completion {
    pub target: Target,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier, mpsc};
    use std::time::Duration;

    #[test]
    fn test_inline_runner_runs_before_returning() {
        let (tx, rx) = mpsc::channel();
        InlineRunner.spawn(Box::new(move || {
            let _ = tx.send(1);
        }));
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[test]
    fn test_pool_runner_delivers_over_channel() {
        let (tx, rx) = mpsc::channel();
        PoolRunner::new(2).unwrap().spawn(Box::new(move || {
            let _ = tx.send("done");
        }));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).ok(), Some("done"));
    }

    #[test]
    fn test_pool_runner_sized_for_network_jobs() {
        let runner = PoolRunner::with_default_threads().unwrap();
        assert_eq!(runner.threads(), NETWORK_THREADS);
        assert_eq!(PoolRunner::new(0).unwrap().threads(), 1);
    }

    #[test]
    fn test_pool_runner_jobs_block_concurrently() {
        // Every job waits for all the others; a pool narrower than the job
        // count would never release the barrier.
        let runner = PoolRunner::with_default_threads().unwrap();
        let barrier = Arc::new(Barrier::new(NETWORK_THREADS));
        let (tx, rx) = mpsc::channel();

        for i in 0..NETWORK_THREADS {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            runner.spawn(Box::new(move || {
                barrier.wait();
                let _ = tx.send(i);
            }));
        }

        let mut done: Vec<usize> = (0..NETWORK_THREADS)
            .filter_map(|_| rx.recv_timeout(Duration::from_secs(5)).ok())
            .collect();
        done.sort_unstable();
        assert_eq!(done, (0..NETWORK_THREADS).collect::<Vec<_>>());
    }
}
