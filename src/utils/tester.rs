//! Instrumented element types, for tests.

use super::root::cell;

/// The number of live `SpyElement` instances spawned off this count.
pub struct SpyCount(cell::Cell<isize>);

impl SpyCount {
    pub fn zero() -> Self { SpyCount(cell::Cell::new(0)) }

    pub fn get(&self) -> isize { self.0.get() }

    fn increment(&self) { self.0.set(self.0.get() + 1); }

    fn decrement(&self) { self.0.set(self.0.get() - 1); }
}

/// An element tracking its own construction and destruction.
///
/// Deliberately not `Clone`: any duplication inside a container would fail
/// to compile, and any double drop drives the count negative.
pub struct SpyElement<'a> {
    count: &'a SpyCount,
}

impl<'a> SpyElement<'a> {
    pub fn new(count: &'a SpyCount) -> Self {
        count.increment();

        SpyElement { count }
    }
}

impl<'a> Drop for SpyElement<'a> {
    fn drop(&mut self) {
        self.count.decrement();
    }
}
