//! #   A hash map over a `NodeAllocator`.
//!
//! `HashMap` is a keyed container built on the hash table engine: an
//! open-chained table whose nodes come from a `NodeAllocator` and whose
//! bucket array is a `BucketStore`. The default configuration hashes with
//! `RandomState`, allocates from the heap, and grows its buckets; swap in an
//! `Arena` and a `FixedBuckets` and the same map runs without ever touching
//! the platform allocator, reporting `OutOfMemory` when its storage runs
//! out.
//!
//! References to entries remain valid across insertions, removals of other
//! entries, and rehashes: nodes never move once allocated.

mod entry;
mod hashmap;
mod iterator;

pub use self::entry::Entry;
pub use self::hashmap::HashMap;
pub use self::iterator::{Iter, IterMut, Keys, Values, ValuesMut};

use super::allocator;
use super::failure;
use super::root;
use super::table;
