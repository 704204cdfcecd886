//! A module for handling diagnostics produced while processing a source unit.
//!
//! Phases never abort on a diagnostic; they hand it to a [`Handler`] and keep going.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    RwLock, RwLockReadGuard,
};

use derive_more::Deref;

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, error: T);
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
#[derive(Debug, Deref)]
pub struct Storage<T: Send + Sync> {
    errors: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            errors: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the received diagnostics in arrival order.
    pub fn into_vec(self) -> Vec<T> { self.errors.into_inner().unwrap() }

    /// Returns a read guard over the received diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.errors.read().unwrap() }

    /// Returns the number of diagnostics received so far.
    pub fn len(&self) -> usize { self.as_vec().len() }

    /// Returns `true` if no diagnostic has been received.
    pub fn is_empty(&self) -> bool { self.as_vec().is_empty() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, error: U) { self.errors.write().unwrap().push(error.into()); }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _error: T) {}
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.store(0, Ordering::Relaxed); }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _error: T) { self.counter.fetch_add(1, Ordering::Relaxed); }
}

#[cfg(test)]
mod tests {
    use super::{Counter, Dummy, Handler, Storage};

    #[test]
    fn storage_keeps_arrival_order() {
        let storage: Storage<String> = Storage::new();
        assert!(storage.is_empty());

        storage.receive("first");
        storage.receive(String::from("second"));

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.into_vec(), vec!["first", "second"]);
    }

    #[test]
    fn counter_counts_and_resets() {
        let counter = Counter::default();
        counter.receive(1);
        counter.receive("two");
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn dummy_discards() {
        let handler: &dyn Handler<i32> = &Dummy;
        handler.receive(42);
    }
}
