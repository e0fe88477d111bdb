use crate::types::Value;
use core::{fmt, ptr};

/// Receiver of a task's outcome.
///
/// Every task reports to exactly one `Completion`. In this workload only
/// [`accept_value`](Completion::accept_value) is ever legitimately reached; the
/// other two methods exist to complete the notification surface and
/// implementors treat them as contract violations.
pub trait Completion: Sync {
    /// Report a successfully computed value.
    fn accept_value(&self, value: Value);
    /// Report a failure with an error code.
    fn accept_error(&self, code: i32);
    /// Report completion without a value.
    fn accept_done(&self);
}

/// Non-owning, type-erased reference to some [`Completion`].
///
/// A task's completion target is, at every level but the root, the fan-in node
/// of another task of the same recursive type. The handle hides the concrete
/// target behind a vtable so the task type doesn't have to name itself.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct CompletionHandle<'a>(&'a dyn Completion);

impl<'a> CompletionHandle<'a> {
    /// Bind a handle to `target`. The handle cannot outlive it.
    #[inline]
    pub fn new(target: &'a dyn Completion) -> Self {
        Self(target)
    }

    /// Forward a value to the bound completion.
    #[inline]
    pub fn accept_value(self, value: Value) {
        self.0.accept_value(value);
    }

    /// Forward an error code to the bound completion.
    #[inline]
    pub fn accept_error(self, code: i32) {
        self.0.accept_error(code);
    }

    /// Forward a done signal to the bound completion.
    #[inline]
    pub fn accept_done(self) {
        self.0.accept_done();
    }
}

impl fmt::Debug for CompletionHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompletionHandle")
            .field(&ptr::from_ref(self.0).cast::<()>())
            .finish()
    }
}

/// Panics with a diagnostic on a completion path the workload never reaches.
#[cold]
#[track_caller]
pub(crate) fn contract_violation(what: &str) -> ! {
    panic!("completion contract violated: {what}")
}
