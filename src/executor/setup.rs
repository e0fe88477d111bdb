use core::num::NonZeroUsize;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::thread;
use thiserror::Error;
use tracing::debug;

/// Error kind for executor setup failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecutorSetupError {
    /// The worker pool could not be started.
    #[error("failed to start worker pool")]
    Pool(#[from] ThreadPoolBuildError),
}

pub(super) fn build_pool(threads: Option<NonZeroUsize>) -> Result<ThreadPool, ExecutorSetupError> {
    let threads = threads
        .or_else(|| thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("skynet-worker-{idx}"))
        .build()?;
    debug!(threads, "worker pool started");
    Ok(pool)
}
