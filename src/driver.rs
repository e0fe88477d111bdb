use crate::{
    completion::CompletionHandle,
    config::{ConfigError, RunConfig},
    executor::{Executor, ExecutorSetupError, enqueue},
    sink::TerminalSink,
    sync::yield_now,
    task::{SkynetTask, Task},
    types::{Value, expected_sum},
};
use core::{fmt, time::Duration};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Error kind for runs that never started.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The executor could not be built.
    #[error(transparent)]
    Executor(#[from] ExecutorSetupError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Length of the summed range.
    pub size: u32,
    /// Number of executor workers.
    pub parallelism: usize,
    /// The value that reached the terminal sink.
    pub result: Value,
    /// Time from building the root task until the executor drained.
    pub elapsed: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result: {} in {} ms.",
            self.result,
            self.elapsed.as_millis()
        )
    }
}

/// Sum `index..index + size` with the recursive task tree on `executor`.
///
/// # Panics
/// If `index + size` overflows `u32`. This is checked on the calling thread
/// before any task runs.
pub fn compute(executor: &Executor, index: u32, size: u32) -> Value {
    let sink = TerminalSink::new();
    let mut root = SkynetTask::new(index, size, CompletionHandle::new(&sink));
    drive(executor, &mut root, &sink)
}

/// Run `root` to completion and return the value it reported into `sink`.
///
/// Enqueues the root task, spins on the terminal sink (yielding between
/// checks) until the final value arrives, then waits for every spawned task to
/// drain before returning the value. A panic inside the task tree aborts the
/// process (see [`enqueue`]), so the spin never outlives a failed task.
///
/// # Panics
/// If the executor drains without `root` having reported into `sink`.
pub fn drive<'s, T: Task<'s>>(
    executor: &Executor,
    root: &'s mut T,
    sink: &'s TerminalSink,
) -> Value {
    executor.run(|scope| {
        enqueue(scope, root);
        let mut polls = 0_u64;
        while !sink.is_done() {
            polls += 1;
            yield_now();
        }
        debug!(polls, "root task reported");
    });
    sink.result().expect("drive: [1]")
}

/// Run the benchmark described by `config`.
///
/// # Errors
/// If the configuration is invalid or the executor can't be built.
///
/// # Panics
/// If the computed sum differs from the closed form. The task tree is correct
/// by construction, so a mismatch is a defect, never a recoverable outcome.
pub fn run(config: &RunConfig) -> Result<Report, RunError> {
    config.validate()?;
    let executor = Executor::setup(config.threads)?;
    let parallelism = executor.parallelism();
    info!(size = config.size, parallelism, "starting run");

    let started = Instant::now();
    let result = compute(&executor, 0, config.size);
    let elapsed = started.elapsed();

    let expected = expected_sum(config.size);
    assert_eq!(
        result, expected,
        "sum over 0..{} is {result}, expected {expected}",
        config.size
    );
    info!(result, elapsed_ms = elapsed.as_millis(), "run finished");
    Ok(Report {
        size: config.size,
        parallelism,
        result,
        elapsed,
    })
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use core::num::NonZeroUsize;

    #[test]
    fn compute_sums_shifted_ranges() {
        let executor = Executor::setup(NonZeroUsize::new(2)).unwrap();
        assert_eq!(compute(&executor, 5, 10), 95);
        assert_eq!(compute(&executor, 0, 100), 4950);
        assert_eq!(compute(&executor, 1_000, 1_000), 1_499_500);
    }

    #[test]
    fn compute_on_a_single_worker_terminates() {
        let executor = Executor::setup(NonZeroUsize::new(1)).unwrap();
        assert_eq!(compute(&executor, 0, 10_000), 49_995_000);
    }

    #[test]
    #[should_panic(expected = "overflows u32")]
    fn compute_rejects_overflowing_range_up_front() {
        let executor = Executor::setup(NonZeroUsize::new(2)).unwrap();
        let _ = compute(&executor, u32::MAX - 3, 5);
    }

    #[test]
    fn compute_accepts_range_ending_at_u32_max() {
        let executor = Executor::setup(NonZeroUsize::new(2)).unwrap();
        let expected =
            (u32::MAX - 5..u32::MAX).fold(0_i32, |acc, i| acc.wrapping_add(i.cast_signed()));
        assert_eq!(compute(&executor, u32::MAX - 5, 5), expected);
    }

    #[test]
    fn run_reports_canonical_result() {
        let report = run(&RunConfig::default()).unwrap();
        assert_eq!(report.size, 10_000);
        assert_eq!(report.result, 49_995_000);
        assert!(report.parallelism >= 1);
    }

    #[test]
    fn run_rejects_unverifiable_size() {
        let config = RunConfig::builder().size(25).build();
        assert!(matches!(
            run(&config),
            Err(RunError::Config(ConfigError::SizeNotPowerOfTen(25)))
        ));
    }

    #[test]
    fn report_display() {
        let report = Report {
            size: 10_000,
            parallelism: 8,
            result: 49_995_000,
            elapsed: Duration::from_micros(12_345),
        };
        assert_eq!(report.to_string(), "Result: 49995000 in 12 ms.");
    }
}
