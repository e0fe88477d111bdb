#[cfg(feature = "loom")]
mod imp {
    pub(crate) use loom::{
        cell::UnsafeCell,
        sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering, fence},
        thread::yield_now,
    };
}

#[cfg(not(feature = "loom"))]
mod imp {
    use crate::types::SyncUnsafeCell;
    pub(crate) use core::{
        cell::UnsafeCell,
        sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering, fence},
    };
    pub(crate) use std::thread::yield_now;

    pub(crate) trait LoomPtrCompat: Sized {
        type Ptr;
        fn with<R>(self, f: impl FnOnce(Self::Ptr) -> R) -> R;
    }

    impl<T> LoomPtrCompat for *mut T {
        type Ptr = *mut T;
        fn with<R>(self, f: impl FnOnce(Self::Ptr) -> R) -> R {
            f(self)
        }
    }

    pub(crate) trait LoomUnsafeCellCompat<T> {
        fn get_mut(&self) -> impl LoomPtrCompat<Ptr = *mut T>;
    }

    impl<T> LoomUnsafeCellCompat<T> for SyncUnsafeCell<T> {
        fn get_mut(&self) -> impl LoomPtrCompat<Ptr = *mut T> {
            self.get()
        }
    }
}

pub(crate) use imp::*;
