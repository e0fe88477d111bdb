use crate::task::Task;
use core::mem;
use rayon::Scope;
use std::process;
use tracing::error;

/// Submit `task` for execution on the scope's workers. Never blocks.
///
/// The task is borrowed, not moved: whoever holds it (the parent task, or the
/// driver for the root) stays its owner, and the scope guarantees the borrow
/// ends before the owner can be dropped.
///
/// A panic inside `task` aborts the process. Rayon would only resume the panic
/// once the scope exits, and a driver spinning on a result that never arrives
/// keeps the scope open forever.
#[inline]
pub fn enqueue<'s, T: Task<'s>>(scope: &Scope<'s>, task: &'s mut T) {
    scope.spawn(move |scope| {
        let guard = AbortOnUnwind;
        task.execute(scope);
        mem::forget(guard);
    });
}

/// Aborts the process if dropped, i.e. if the task it guards unwinds.
struct AbortOnUnwind;

impl Drop for AbortOnUnwind {
    #[cold]
    fn drop(&mut self) {
        error!("task panicked on an executor worker, aborting");
        process::abort();
    }
}
