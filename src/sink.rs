use crate::{
    completion::{Completion, contract_violation},
    sync::*,
    types::{SyncUnsafeCell, Value},
};
use derive_more::Debug;

/// Root-level completion: captures the final value and signals the driver.
///
/// The driver polls [`is_done`](TerminalSink::is_done); once it returns
/// `true`, [`result`](TerminalSink::result) is guaranteed to observe the
/// written value.
#[must_use]
#[derive(Debug)]
pub struct TerminalSink {
    /// Final value. Written once, before `done` is released.
    #[debug(skip)]
    result: SyncUnsafeCell<Value>,
    /// Set by the single writer before it touches `result`.
    claimed: AtomicBool,
    /// Released after `result` is written.
    done: AtomicBool,
}

impl TerminalSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            result: SyncUnsafeCell::new(0),
            claimed: AtomicBool::new(false),
            done: AtomicBool::new(false),
        }
    }

    /// Whether the final value has been written.
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// The final value, once written.
    #[must_use]
    pub fn result(&self) -> Option<Value> {
        if !self.is_done() {
            return None;
        }
        // SAFETY: `done` was observed with Acquire, pairing with the Release store
        // that follows the only write to `result`. `claimed` rejects any second
        // writer, so no write can be concurrent with this read.
        let value = unsafe { self.result.get().with(|ptr| *ptr) };
        Some(value)
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Completion for TerminalSink {
    fn accept_value(&self, value: Value) {
        if self.claimed.swap(true, Ordering::Relaxed) {
            contract_violation("terminal sink received a second value");
        }
        // SAFETY: the `claimed` swap above makes this thread the only writer, and
        // readers only dereference the cell after acquiring `done`, which is
        // released below.
        unsafe { self.result.get_mut().with(|ptr| *ptr = value) };
        self.done.store(true, Ordering::Release);
    }

    fn accept_error(&self, code: i32) {
        contract_violation(&format!("terminal sink received error code {code}"))
    }

    fn accept_done(&self) {
        contract_violation("terminal sink received a done signal")
    }
}
