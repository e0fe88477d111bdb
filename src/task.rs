use crate::{
    completion::CompletionHandle,
    executor::enqueue,
    fan_in::FanIn,
    types::{FAN_OUT, LEAF_THRESHOLD},
    utils::RangeSubdivide,
};
use core::ops::Range;
use derive_more::Debug;
use rayon::Scope;

/// A unit of work runnable on the [`Executor`](crate::executor::Executor).
///
/// `execute` borrows the task for the whole scope `'s`, so anything the task
/// hands out to children (references to its own fields) stays valid until
/// every task spawned in the scope has finished.
pub trait Task<'s>: Send + 's {
    /// Run the task. New work is submitted through `scope`.
    fn execute(&'s mut self, scope: &Scope<'s>);
}

/// One node of the recursive summation tree over `index..index + size`.
///
/// A leaf (`size < 10`) sums its range and reports to `parent`. An internal
/// task splits its range into ten equal parts, owns the ten child tasks, and
/// lets them report into its own [`FanIn`], which forwards the total to
/// `parent` once all ten have arrived.
#[must_use]
#[derive(Debug)]
pub struct SkynetTask<'s> {
    /// Start of the range.
    index: u32,
    /// Length of the range.
    size: u32,
    /// Set when an internal task executes. Dropped together with this task.
    #[debug(skip)]
    children: Option<Box<[SkynetTask<'s>; FAN_OUT]>>,
    /// Aggregates the children's reports and forwards them to `parent`.
    fan_in: FanIn<'s>,
    /// Where this task's own result goes.
    parent: CompletionHandle<'s>,
}

impl<'s> SkynetTask<'s> {
    /// Create a task over `index..index + size` reporting to `parent`.
    ///
    /// # Panics
    /// If `index + size` overflows `u32`.
    pub fn new(index: u32, size: u32, parent: CompletionHandle<'s>) -> Self {
        assert!(
            index.checked_add(size).is_some(),
            "range start {index} plus size {size} overflows u32"
        );
        Self {
            index,
            size,
            children: None,
            fan_in: FanIn::new(parent),
            parent,
        }
    }

    /// Whether this task sums its range directly.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.size < LEAF_THRESHOLD
    }

    /// The range this task covers.
    #[must_use]
    pub fn range(&self) -> Range<u32> {
        self.index..self.index + self.size
    }
}

impl<'s> Task<'s> for SkynetTask<'s> {
    fn execute(&'s mut self, scope: &Scope<'s>) {
        if self.is_leaf() {
            self.parent.accept_value(self.range().wrapping_sum());
            return;
        }

        let parts = self.range().subdivide();
        let Self {
            children, fan_in, ..
        } = self;
        let fan_in = CompletionHandle::new(&*fan_in);
        // All ten are stored before the first one is enqueued.
        let children = children.insert(Box::new(
            parts.map(|part| SkynetTask::new(part.start, part.end - part.start, fan_in)),
        ));
        for child in children.iter_mut() {
            enqueue(scope, child);
        }
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use crate::{executor::Executor, sink::TerminalSink};
    use core::num::NonZeroUsize;

    fn sum(index: u32, size: u32) -> Option<i32> {
        let executor = Executor::setup(NonZeroUsize::new(4)).unwrap();
        let sink = TerminalSink::new();
        let mut task = SkynetTask::new(index, size, CompletionHandle::new(&sink));
        executor.run(|scope| enqueue(scope, &mut task));
        sink.result()
    }

    #[test]
    fn leaf_boundary() {
        let sink = TerminalSink::new();
        let handle = CompletionHandle::new(&sink);
        assert!(SkynetTask::new(0, 9, handle).is_leaf());
        assert!(!SkynetTask::new(0, 10, handle).is_leaf());
        assert!(SkynetTask::new(0, 0, handle).is_leaf());
    }

    #[test]
    fn leaf_sums_directly() {
        assert_eq!(sum(0, 9), Some(36));
        assert_eq!(sum(100, 1), Some(100));
        assert_eq!(sum(3, 0), Some(0));
    }

    #[test]
    fn size_ten_fans_out_into_single_element_leaves() {
        assert_eq!(sum(5, 10), Some(95));
    }

    #[test]
    fn two_levels() {
        assert_eq!(sum(0, 100), Some(4950));
    }

    #[test]
    fn canonical_size() {
        assert_eq!(sum(0, 10_000), Some(49_995_000));
    }

    #[test]
    fn remainder_is_dropped() {
        // 25 splits into ten parts of 2, covering 0..20 only.
        assert_eq!(sum(0, 25), Some(190));
        // 109 splits into ten parts of 10; each part fans out again.
        assert_eq!(sum(0, 109), Some(4950));
    }

    #[test]
    fn range_ending_at_u32_max_is_accepted() {
        let sink = TerminalSink::new();
        let task = SkynetTask::new(u32::MAX - 5, 5, CompletionHandle::new(&sink));
        assert_eq!(task.range(), u32::MAX - 5..u32::MAX);
    }

    #[test]
    #[should_panic(expected = "range start 4294967292 plus size 5 overflows u32")]
    fn overflowing_range_is_rejected_before_running() {
        let sink = TerminalSink::new();
        let _ = SkynetTask::new(u32::MAX - 3, 5, CompletionHandle::new(&sink));
    }

    #[test]
    fn range_reflects_index_and_size() {
        let sink = TerminalSink::new();
        let task = SkynetTask::new(40, 15, CompletionHandle::new(&sink));
        assert_eq!(task.range(), 40..55);
    }
}
