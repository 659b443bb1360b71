//! Bucket stores.
//!
//! The engine records bucket boundaries as *anchors*: for each bucket, the
//! position on the master chain just before the bucket's first node. The
//! predecessor form is what makes unlinking a segment's first node O(1)
//! without back links.
//!
//! The `BucketStore` trait abstracts the array holding those anchors, with
//! two implementations: `DynamicBuckets`, heap-backed and growable, and
//! `FixedBuckets`, an inline array of constant size for allocation-free
//! tables.

use super::node::Node;
use super::root::ptr;

/// The position of a bucket's first node, expressed as its predecessor on the
/// master chain.
pub enum Anchor<T> {
    /// The bucket holds no node.
    Empty,
    /// The bucket's first node is the head of the master chain.
    Head,
    /// The bucket's first node is the successor of this node, which belongs
    /// to another bucket.
    Before(ptr::NonNull<Node<T>>),
}

impl<T> Clone for Anchor<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Anchor<T> {}

/// BucketStore
///
/// The array of anchors of one hash table.
///
/// A store is always used with the same table: the engine never validates
/// that the anchors it reads were the anchors it wrote.
pub trait BucketStore<T> {
    /// Returns the number of buckets; possibly 0 for a growable store which
    /// never grew.
    fn bucket_count(&self) -> usize;

    /// Returns the anchor of the `index`-th bucket.
    ///
    /// #   Panics
    ///
    /// Panics if `index` is out of bounds.
    fn anchor(&self, index: usize) -> Anchor<T>;

    /// Sets the anchor of the `index`-th bucket.
    ///
    /// #   Panics
    ///
    /// Panics if `index` is out of bounds.
    fn set_anchor(&mut self, index: usize, anchor: Anchor<T>);

    /// Resets all anchors to `Empty`, keeping the bucket count.
    fn reset(&mut self);

    /// Returns whether the bucket count is fixed for the store's lifetime.
    fn is_fixed(&self) -> bool;

    /// Grows the store to `count` buckets, resetting all anchors.
    ///
    /// Returns `false`, and changes nothing, if the store is fixed.
    fn grow_to(&mut self, count: usize) -> bool;
}

/// DynamicBuckets
///
/// A growable, heap-backed bucket store; the default store of heap-backed
/// containers. Starts with 0 buckets, so that an empty table costs no
/// allocation.
#[cfg(feature = "with-std")]
pub struct DynamicBuckets<T>(Vec<Anchor<T>>);

#[cfg(feature = "with-std")]
impl<T> DynamicBuckets<T> {
    /// Creates an instance with 0 buckets.
    pub fn new() -> Self { DynamicBuckets(Vec::new()) }

    /// Creates an instance with exactly `count` buckets, all empty.
    pub fn with_bucket_count(count: usize) -> Self {
        DynamicBuckets((0..count).map(|_| Anchor::Empty).collect())
    }
}

#[cfg(feature = "with-std")]
impl<T> BucketStore<T> for DynamicBuckets<T> {
    fn bucket_count(&self) -> usize { self.0.len() }

    fn anchor(&self, index: usize) -> Anchor<T> { self.0[index] }

    fn set_anchor(&mut self, index: usize, anchor: Anchor<T>) {
        self.0[index] = anchor;
    }

    fn reset(&mut self) {
        for anchor in &mut self.0 {
            *anchor = Anchor::Empty;
        }
    }

    fn is_fixed(&self) -> bool { false }

    fn grow_to(&mut self, count: usize) -> bool {
        self.0.clear();
        self.0.resize(count, Anchor::Empty);
        true
    }
}

#[cfg(feature = "with-std")]
impl<T> Default for DynamicBuckets<T> {
    fn default() -> Self { Self::new() }
}

/// FixedBuckets
///
/// An inline bucket store of constant size, for tables which must never
/// touch the platform allocator. The bucket count never changes; under
/// sustained insertion the load factor simply rises past its configured
/// maximum.
pub struct FixedBuckets<T, const B: usize>([Anchor<T>; B]);

impl<T, const B: usize> FixedBuckets<T, B> {
    /// Creates an instance.
    pub fn new() -> Self {
        assert!(B > 0);

        FixedBuckets([Anchor::Empty; B])
    }
}

impl<T, const B: usize> BucketStore<T> for FixedBuckets<T, B> {
    fn bucket_count(&self) -> usize { B }

    fn anchor(&self, index: usize) -> Anchor<T> { self.0[index] }

    fn set_anchor(&mut self, index: usize, anchor: Anchor<T>) {
        self.0[index] = anchor;
    }

    fn reset(&mut self) {
        for anchor in &mut self.0 {
            *anchor = Anchor::Empty;
        }
    }

    fn is_fixed(&self) -> bool { true }

    fn grow_to(&mut self, _count: usize) -> bool { false }
}

impl<T, const B: usize> Default for FixedBuckets<T, B> {
    fn default() -> Self { Self::new() }
}
