//! Common types shared by the collection, filter and config modules.

mod value;

pub use value::*;

use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, interiorly mutable cell.
///
/// Every clone of an `Atomic<T>` points at the same `T`; this is how a
/// [crate::collection::Collection] shares its elements with every handle that
/// was cloned from it.
pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

pub trait ReadExecutor<T: ?Sized> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T> ReadExecutor<T> for Atomic<T> {
    #[inline]
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        // recursive reads keep nested collections that alias each other from
        // blocking behind a queued writer
        let read_guard = self.read_recursive();
        f(&*read_guard)
    }
}

pub trait WriteExecutor<T: ?Sized> {
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> WriteExecutor<T> for Atomic<T> {
    #[inline]
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut write_guard = self.write();
        f(&mut *write_guard)
    }
}
