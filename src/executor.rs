mod execute;
mod setup;

pub use crate::executor::execute::enqueue;
pub use crate::executor::setup::ExecutorSetupError;
use core::num::NonZeroUsize;
use derive_more::Debug;
use rayon::{Scope, ThreadPool};

/// Work-stealing executor that runs [`Task`](crate::task::Task)s in parallel.
///
/// Key responsibilities:
/// - Owns a rayon worker pool sized to the available parallelism (or an
///   explicit worker count).
/// - Accepts tasks through [`enqueue`] from inside [`Executor::run`].
/// - Acts as the await point: `run` returns only once every task enqueued
///   within it, transitively, has completed.
#[must_use]
#[derive(Debug)]
pub struct Executor {
    pool: ThreadPool,
}

impl Executor {
    /// Build an executor with `threads` workers, or one per available CPU when
    /// `threads` is `None`.
    ///
    /// # Errors
    /// If the operating system refuses to spawn the worker threads.
    pub fn setup(threads: Option<NonZeroUsize>) -> Result<Self, ExecutorSetupError> {
        setup::build_pool(threads).map(|pool| Self { pool })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` on the calling thread with a scope tied to this executor's
    /// workers, then block until all work enqueued on that scope has drained.
    ///
    /// `op` itself is not executed on a worker, so it may spin waiting for
    /// results without taking a worker away from the tasks it waits on.
    pub fn run<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&Scope<'scope>) -> R,
    {
        self.pool.in_place_scope(op)
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use crate::task::Task;
    use derive_more::Debug;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Counts its own executions and re-enqueues `depth` more levels of
    /// itself.
    #[derive(Debug)]
    struct Chain<'a> {
        depth: u32,
        executed: &'a AtomicU32,
        next: Option<Box<Chain<'a>>>,
    }

    impl<'s> Task<'s> for Chain<'s> {
        fn execute(&'s mut self, scope: &Scope<'s>) {
            self.executed.fetch_add(1, Ordering::Relaxed);
            if self.depth > 0 {
                let next = self.next.insert(Box::new(Chain {
                    depth: self.depth - 1,
                    executed: self.executed,
                    next: None,
                }));
                enqueue(scope, &mut **next);
            }
        }
    }

    #[test]
    fn explicit_worker_count() {
        let executor = Executor::setup(NonZeroUsize::new(3)).unwrap();
        assert_eq!(executor.parallelism(), 3);
    }

    #[test]
    fn default_worker_count_matches_available_parallelism() {
        let executor = Executor::setup(None).unwrap();
        let expected = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        assert_eq!(executor.parallelism(), expected);
    }

    #[test]
    fn run_waits_for_transitively_enqueued_tasks() {
        let executor = Executor::setup(NonZeroUsize::new(2)).unwrap();
        let executed = AtomicU32::new(0);
        let mut root = Chain {
            depth: 50,
            executed: &executed,
            next: None,
        };
        executor.run(|scope| enqueue(scope, &mut root));
        assert_eq!(executed.load(Ordering::Relaxed), 51);
    }

    #[test]
    fn run_returns_the_closure_result() {
        let executor = Executor::setup(NonZeroUsize::new(1)).unwrap();
        assert_eq!(executor.run(|_| 7), 7);
    }
}
