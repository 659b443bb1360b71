//! The keyed table.
//!
//! `Table` packages the raw engine with its three collaborators: the hasher,
//! the node allocator, and the bucket store. It implements the key-oriented
//! operations shared by `HashMap` and `HashSet`, which remain thin wrappers
//! adapting element types and return values.

use super::allocator::NodeAllocator;
use super::buckets::BucketStore;
use super::exchange::{self, Port};
use super::failure::{Failure, Result};
use super::key::Key;
use super::node::Node;
use super::raw::{BucketIter, Chain, RawIter, RawIterMut, RawTable};
use super::root::{borrow, hash, mem, ptr};

/// The outcome of a keyed insertion attempt.
pub(crate) enum Probe<T> {
    /// No element shared the key; the new element was inserted, in this node.
    Inserted(ptr::NonNull<Node<T>>),
    /// This node's element already had the key; the new element is handed
    /// back, untouched.
    Occupied(ptr::NonNull<Node<T>>, T),
}

/// Table
///
/// One hash table: raw engine, hasher, allocator, bucket store.
pub(crate) struct Table<T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    raw: RawTable<T>,
    hasher: S,
    allocator: A,
    buckets: B,
}

impl<T, S, A, B> Table<T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    /// Creates an empty table from its collaborators.
    pub(crate) fn new(hasher: S, allocator: A, buckets: B) -> Self {
        Table { raw: RawTable::new(), hasher, allocator, buckets }
    }

    pub(crate) fn len(&self) -> usize { self.raw.len() }

    pub(crate) fn is_empty(&self) -> bool { self.raw.is_empty() }

    pub(crate) fn max_len(&self) -> usize { self.allocator.max_size() }

    pub(crate) fn allocator(&self) -> &A { &self.allocator }

    pub(crate) fn hasher(&self) -> &S { &self.hasher }

    pub(crate) fn bucket_count(&self) -> usize { self.buckets.bucket_count() }

    pub(crate) fn load_factor(&self) -> f32 {
        let count = self.buckets.bucket_count();

        if count == 0 {
            0.0
        } else {
            self.raw.len() as f32 / count as f32
        }
    }

    pub(crate) fn max_load_factor(&self) -> f32 { self.raw.max_load_factor() }

    /// Sets the maximum load factor, growing immediately if the current load
    /// already exceeds it.
    pub(crate) fn set_max_load_factor(&mut self, factor: f32) {
        self.raw.set_max_load_factor(factor);

        if self.raw.len() > 0 && self.raw.needs_grow(self.buckets.bucket_count()) {
            self.grow_if_needed();
        }
    }

    /// Adjusts the bucket count to at least `bucket_count`, and to at least
    /// what the current length requires, then relinks all nodes.
    ///
    /// A no-op on fixed bucket stores, which cannot change size.
    pub(crate) fn rehash(&mut self, bucket_count: usize) {
        if self.buckets.is_fixed() {
            return;
        }

        let mut count = bucket_count.max(1);

        while self.raw.len() as f32 > self.raw.max_load_factor() * count as f32 {
            count *= 2;
        }

        if self.buckets.grow_to(count) {
            self.raw.rehash(&mut self.buckets);
        }
    }

    /// Removes, destroys, and releases every element.
    pub(crate) fn clear(&mut self) {
        //  The table is emptied before any destructor runs, so a panicking
        //  destructor cannot leave it observing destroyed nodes.
        let mut chain = self.raw.detach(&mut self.buckets);

        while let Some(node) = chain.pop() {
            //  Safety:
            //  -   `node` came off this table's chain, and its slot was
            //      allocated by this table's allocator.
            unsafe {
                let element = self.allocator.destroy(node);
                self.allocator.deallocate(node);
                drop(element);
            }
        }
    }

    pub(crate) fn iter(&self) -> RawIter<'_, T> { self.raw.iter() }

    pub(crate) fn iter_mut(&mut self) -> RawIterMut<'_, T> { self.raw.iter_mut() }

    /// Returns an iterator over one bucket's elements.
    ///
    /// #   Panics
    ///
    /// Panics if `bucket` is out of bounds.
    pub(crate) fn bucket_iter(&self, bucket: usize) -> BucketIter<'_, T> {
        assert!(bucket < self.buckets.bucket_count());

        //  Safety:
        //  -   `buckets` is this table's store, and `bucket` is in bounds.
        unsafe { self.raw.bucket_iter(&self.buckets, bucket) }
    }

    pub(crate) fn bucket_len(&self, bucket: usize) -> usize {
        self.bucket_iter(bucket).count()
    }

    //  Grows a growable store past the load factor threshold, relinking all
    //  nodes; fixed stores let the load factor rise instead.
    fn grow_if_needed(&mut self) {
        if !self.raw.needs_grow(self.buckets.bucket_count()) {
            return;
        }

        if self.buckets.is_fixed() {
            return;
        }

        let target = self.raw.grown_bucket_count(self.buckets.bucket_count());

        if self.buckets.grow_to(target) {
            self.raw.rehash(&mut self.buckets);
        }
    }
}

impl<T, S, A, B> Table<T, S, A, B>
where
    T: Key,
    T::Key: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    pub(crate) fn hash_of<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + hash::Hash,
    {
        use hash::{Hash, Hasher};

        let mut hasher = self.hasher.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the node holding the element of `key`, if any.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<ptr::NonNull<Node<T>>>
    where
        T::Key: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        use borrow::Borrow;

        if self.raw.is_empty() {
            return None;
        }

        let hash = self.hash_of(key);

        //  Safety:
        //  -   `buckets` is this table's store.
        unsafe {
            self.raw.find(&self.buckets, hash, |element| {
                element.key().borrow() == key
            })
        }
    }

    /// Returns the bucket the element of `key` would land in, if any bucket
    /// exists.
    pub(crate) fn bucket_of<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized + hash::Hash,
    {
        let count = self.buckets.bucket_count();

        if count == 0 {
            return None;
        }

        Some(RawTable::<T>::bucket_of(self.hash_of(key), count))
    }

    /// Inserts `element`, unless an element with an equal key is already
    /// present.
    ///
    /// The slot is secured before anything else: on `OutOfMemory` the table
    /// is untouched, not even grown.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory` if the allocator is exhausted.
    pub(crate) fn try_insert(&mut self, element: T) -> Result<Probe<T>> {
        let hash = self.hash_of(element.key());

        if !self.raw.is_empty() {
            //  Safety:
            //  -   `buckets` is this table's store.
            let existing = unsafe {
                self.raw.find(&self.buckets, hash, |candidate| {
                    candidate.key() == element.key()
                })
            };

            if let Some(existing) = existing {
                return Ok(Probe::Occupied(existing, element));
            }
        }

        let Some(slot) = self.allocator.allocate() else {
            return Err(Failure::OutOfMemory);
        };

        self.grow_if_needed();

        //  Safety:
        //  -   `slot` is freshly allocated by this table's allocator, and
        //      `buckets` is this table's store, freshly grown if needed.
        unsafe {
            self.allocator.construct(slot, Node::new(hash, element));
            self.raw.insert(&mut self.buckets, slot);
        }

        Ok(Probe::Inserted(slot))
    }

    /// Removes the element of `key`, handing back its payload.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T::Key: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        let node = self.find(key)?;

        //  Safety:
        //  -   `node` is linked in this table, its slot allocated by this
        //      table's allocator.
        unsafe {
            let node = self.raw.remove(&mut self.buckets, node);
            let element = self.allocator.destroy(node);
            self.allocator.deallocate(node);

            Some(element.into_value())
        }
    }

    /// Exchanges the contents of the two tables.
    ///
    /// O(1) when the backing storages are one and the same; otherwise every
    /// element physically moves to the other side's storage.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both tables untouched, if either
    /// side's content does not fit the other side's storage.
    pub(crate) fn try_swap(&mut self, other: &mut Self) -> Result<()> {
        if self.allocator.handle() == other.allocator.handle() {
            //  Same backing storage: node ownership transfers wholesale.
            mem::swap(self, other);

            return Ok(());
        }

        self.try_swap_with(other)
    }

    /// Exchanges the contents of two tables of arbitrary hasher, allocator
    /// and bucket store types; every element physically moves to the other
    /// side's storage, and is relinked under the destination's hasher.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both tables untouched, if either
    /// side's content does not fit the other side's storage.
    pub(crate) fn try_swap_with<S2, A2, B2>(
        &mut self,
        other: &mut Table<T, S2, A2, B2>,
    ) -> Result<()>
    where
        S2: hash::BuildHasher,
        A2: NodeAllocator<Node<T>>,
        B2: BucketStore<T>,
    {
        let mut left = TablePort { table: self, pending: None };
        let mut right = TablePort { table: other, pending: None };

        exchange::exchange(&mut left, &mut right)
    }
}

impl<T, S, A, B> Drop for Table<T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

//  One side of a table exchange.
//
//  Elements are not moved node by node: on first transfer, the whole master
//  chain is detached into `pending`, then originals are popped off it while
//  received elements are re-inserted, re-hashed, into the table proper. If
//  the exchange unwinds, `Drop` relinks whatever is still pending.
struct TablePort<'a, T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    table: &'a mut Table<T, S, A, B>,
    pending: Option<Chain<T>>,
}

impl<'a, T, S, A, B> TablePort<'a, T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    fn ensure_detached(&mut self) {
        if self.pending.is_none() {
            self.pending =
                Some(self.table.raw.detach(&mut self.table.buckets));
        }
    }
}

impl<'a, T, S, A, B> Port for TablePort<'a, T, S, A, B>
where
    T: Key,
    T::Key: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    type Value = T;

    fn len(&self) -> usize {
        self.table.raw.len() + self.pending.as_ref().map_or(0, Chain::len)
    }

    fn free_slots(&self) -> usize { self.table.allocator.reserve() }

    fn max_len(&self) -> usize { self.table.allocator.max_size() }

    fn take_next(&mut self) -> T {
        self.ensure_detached();

        let Some(node) = self.pending.as_mut().and_then(Chain::pop) else {
            missing_element()
        };

        //  Safety:
        //  -   `node` came off this table's chain, its slot allocated by
        //      this table's allocator.
        unsafe {
            let element = self.table.allocator.destroy(node);
            self.table.allocator.deallocate(node);

            element.into_value()
        }
    }

    fn put_taken(&mut self, value: T) {
        self.ensure_detached();

        let hash = self.table.hash_of(value.key());

        let Some(slot) = self.table.allocator.allocate() else {
            debug_assert!(false, "exchange admitted more elements than capacity");

            return;
        };

        self.table.grow_if_needed();

        //  Safety:
        //  -   `slot` is freshly allocated by this table's allocator.
        unsafe {
            self.table.allocator.construct(slot, Node::new(hash, value));
            self.table.raw.insert(&mut self.table.buckets, slot);
        }
    }

    fn put_first(&mut self, value: T) {
        //  Unordered container: the pivot has no privileged position.
        self.put_taken(value);
    }
}

impl<'a, T, S, A, B> Drop for TablePort<'a, T, S, A, B>
where
    A: NodeAllocator<Node<T>>,
    B: BucketStore<T>,
{
    fn drop(&mut self) {
        //  Relinks the originals not yet taken; a no-op after a completed
        //  exchange, the safety net of an unwinding one.
        let Some(chain) = self.pending.as_mut() else { return };

        while let Some(node) = chain.pop() {
            //  Safety:
            //  -   `node` came off this table's chain, unlinked.
            unsafe { self.table.raw.insert(&mut self.table.buckets, node) };
        }
    }
}

#[cold]
#[inline(never)]
fn missing_element() -> ! {
    panic!("Exchange took more elements than were present");
}
