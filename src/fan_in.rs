use crate::{
    completion::{Completion, CompletionHandle, contract_violation},
    sync::{AtomicI32, AtomicU32, Ordering, fence},
    types::{FAN_OUT, Value},
};
use derive_more::Debug;

/// Lock-free aggregation point for the reports of one task's ten children.
///
/// Each child calls [`accept_value`](Completion::accept_value) exactly once.
/// The call that brings the report count from nine to ten forwards the
/// accumulated total to `parent`; no other call ever forwards.
///
/// Publication protocol:
/// - every contributor adds its value (Relaxed), then issues a Release fence,
///   then bumps the report counter (Relaxed);
/// - the contributor that observes the counter at nine issues an Acquire fence
///   before reading the total, so all ten additions happen-before the forward.
#[must_use]
#[derive(Debug)]
#[repr(align(128))]
pub struct FanIn<'a> {
    /// Completion one level up: another task's fan-in node, or the terminal
    /// sink above the root.
    parent: CompletionHandle<'a>,
    /// Wrapping sum of the values reported so far.
    accumulated_result: AtomicI32,
    /// Number of reports received so far.
    reports_received: AtomicU32,
}

impl<'a> FanIn<'a> {
    /// Create an empty node forwarding to `parent`.
    pub fn new(parent: CompletionHandle<'a>) -> Self {
        Self {
            parent,
            accumulated_result: AtomicI32::new(0),
            reports_received: AtomicU32::new(0),
        }
    }

    /// Number of reports received so far.
    ///
    /// Only meaningful once all reporters have finished; while reports are in
    /// flight this is a relaxed snapshot.
    pub fn reports_received(&self) -> u32 {
        self.reports_received.load(Ordering::Relaxed)
    }
}

impl Completion for FanIn<'_> {
    fn accept_value(&self, value: Value) {
        self.accumulated_result.fetch_add(value, Ordering::Relaxed);
        fence(Ordering::Release);
        let previous = self.reports_received.fetch_add(1, Ordering::Relaxed);
        let last = u32::try_from(FAN_OUT).expect("FanIn::accept_value: [1]") - 1;
        match previous.cmp(&last) {
            core::cmp::Ordering::Less => {}
            core::cmp::Ordering::Equal => {
                fence(Ordering::Acquire);
                let total = self.accumulated_result.load(Ordering::Relaxed);
                self.parent.accept_value(total);
            }
            core::cmp::Ordering::Greater => contract_violation(&format!(
                "fan-in node received report #{} but expects exactly {FAN_OUT}",
                previous + 1
            )),
        }
    }

    fn accept_error(&self, code: i32) {
        contract_violation(&format!("fan-in node received error code {code}"))
    }

    fn accept_done(&self) {
        contract_violation("fan-in node received a done signal")
    }
}
