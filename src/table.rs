//! #   The hash table engine.
//!
//! Every unordered associative container of this library is a thin wrapper
//! over the engine defined here: an open-chained hash table whose nodes are
//! threaded on a single forward-linked *master chain*. Bucket boundaries are
//! segments of that chain, recorded in an externally owned array of
//! *anchors*; whole-table iteration therefore never inspects the bucket
//! array, and rehashing relinks nodes without ever reconstructing their
//! payloads.
//!
//! The engine splits in two layers:
//!
//! -   `RawTable` knows only about nodes, hashes and anchors. It allocates
//!     nothing: nodes enter via `insert` and leave, still owned, via
//!     `remove`, which is how "erase" and "steal into another container"
//!     share one primitive.
//! -   `Table` packages a `RawTable` with a hasher, a `NodeAllocator` and a
//!     `BucketStore`, and implements the key-oriented operations the
//!     `HashMap` and `HashSet` containers delegate to.

pub mod buckets;
pub mod key;
pub mod node;
pub mod raw;

pub(crate) mod api;

use super::allocator;
use super::exchange;
use super::failure;
use super::root;

/// Number of buckets allocated by a growable bucket store on first insertion.
pub const DEFAULT_BUCKET_COUNT: usize = 8;
