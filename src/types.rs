use crate::sync::UnsafeCell;
use derive_more::{Deref, DerefMut};

/// A minimal `UnsafeCell` wrapper that is `Sync` when `T: Sync`.
///
/// Used for the terminal sink's result slot, which is written exactly once and
/// read only after the write has been published through an atomic flag.
#[derive(Debug, Deref, DerefMut)]
#[repr(transparent)]
pub(crate) struct SyncUnsafeCell<T>(UnsafeCell<T>);

unsafe impl<T: Sync> Sync for SyncUnsafeCell<T> {}

impl<T> SyncUnsafeCell<T> {
    pub(crate) fn new(val: T) -> Self {
        Self(UnsafeCell::new(val))
    }
}

/// Value carried through the completion channel.
///
/// Arithmetic on it wraps on overflow; there is no overflow checking anywhere
/// in the reporting path.
pub type Value = i32;

/// Number of children an internal task spawns, and the number of reports a
/// fan-in node waits for.
pub const FAN_OUT: usize = 10;

/// Ranges shorter than this are summed directly instead of subdivided.
pub const LEAF_THRESHOLD: u32 = 10;

/// Input size of the canonical benchmark run.
pub const CANONICAL_SIZE: u32 = 10_000;

/// Closed-form `0 + 1 + ... + (size - 1)`, truncated to 32 bits.
///
/// For the canonical size this is `49_995_000`. Larger sizes wrap exactly as
/// the fan-in accumulation does.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn expected_sum(size: u32) -> Value {
    let n = u64::from(size);
    let total = n * n.saturating_sub(1) / 2;
    (total as u32).cast_signed()
}
