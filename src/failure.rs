//! The Failure and Result types of this library.
//!
//! The containers in this library draw their storage from allocators which may
//! be backed by fixed-capacity arenas. Any method which attempts to add an
//! element may therefore fail, and the cause of the error is represented as a
//! `Failure`.
//!
//! All faillible methods come in two versions:
//!
//! -   A faillible `try_xxx` version, which returns a `Result` with `Failure` as the error type.
//! -   A convenience `xxx` version, which invokes the `try_xxx` version and panics in case of error.

use super::root::{error, fmt, result};

/// Universal Failure type of this library.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Failure {
    /// The allocator could not provide a slot; for arena allocators, the arena
    /// is full.
    OutOfMemory,
    /// The contents of one container can provably not fit within the capacity
    /// of the other, so the exchange was not even started.
    ExceedsCapacity,
}

impl error::Error for Failure {}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Universal Result type of this library.
pub type Result<T> = result::Result<T, Failure>;

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn failure_display() {
    assert_eq!("OutOfMemory", format!("{}", Failure::OutOfMemory));
    assert_eq!("ExceedsCapacity", format!("{}", Failure::ExceedsCapacity));
}

}
