//! Recursive fan-out / fan-in task spawning benchmark ("Skynet").
//!
//! The sum of `0..10_000` is computed by a tree of tasks: every task whose
//! range holds at least ten integers splits it into ten equal parts and
//! spawns a child for each, until ranges are short enough to sum directly.
//! Partial sums then flow back up through lock-free fan-in nodes to a single
//! terminal sink. The run measures how fast the executor spawns and
//! synchronizes eleven thousand short-lived tasks.
//!
//! Key modules:
//! - `completion`: the `Completion` trait every result receiver implements,
//!   and the type-erased `CompletionHandle` tasks report through.
//! - `fan_in`: the node that aggregates exactly ten reports with atomics and
//!   forwards the total once.
//! - `task`: the `Task` interface and the recursive `SkynetTask`.
//! - `sink`: the terminal sink the driver polls.
//! - `executor`: the rayon-backed executor (`enqueue`, await, parallelism).
//! - `driver`: wires the pieces together, times the run, checks the result.
//! - `config`: run parameters with canonical defaults.
//!
//! Every report is a value; there is no error channel in practice. Error and
//! done notifications, an eleventh report to a fan-in node, or a second value
//! reaching the sink are contract violations and panic.
//!
//! The fan-in protocol publishes each contribution with a Release fence before
//! a Relaxed counter increment, and the reporter that completes the count
//! issues an Acquire fence before forwarding, so the forwarded total always
//! includes all ten contributions.

/// Completion notifications and type-erased handles to them.
pub mod completion;
/// Run parameters.
pub mod config;
/// Benchmark driver: builds the root task, polls for the result, times the
/// run.
pub mod driver;
/// The executor tasks are enqueued on.
///
/// Wraps a rayon worker pool. `Executor::run` opens a scope on the calling
/// thread and only returns once all work enqueued on it has drained.
pub mod executor;
/// Lock-free ten-way fan-in node.
pub mod fan_in;
/// Terminal sink at the root of the reporting chain.
pub mod sink;
mod sync;
/// Task definitions: the `Task` interface and the recursive summation task.
pub mod task;
/// Shared constants, the value type, and the `SyncUnsafeCell` primitive used
/// internally.
pub mod types;
mod utils;
